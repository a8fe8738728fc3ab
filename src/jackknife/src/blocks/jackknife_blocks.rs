use std::fmt::{self, Display, Formatter};

use log::{debug, trace};

use super::{JackknifeBlock, Pseudovalue};
use crate::{Estimator, JackknifeError, JackknifeSummary, Replicate};

/// Partition of an observation sequence into contiguous `JackknifeBlock`s, for delete-m jackknife
/// resampling. Every block holds `block_size` observations, except possibly the last one.
///
/// # Traits:
///   - `Display` : Pretty print, for file writing and debug. Recursively calls `Display` for each
///     `JackknifeBlock` found within the `blocks` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JackknifeBlocks {
    blocks       : Vec<JackknifeBlock>,
    observations : usize,
}

/// Delete-m jackknife results.
/// - `full`         : estimate obtained from all observations.
/// - `estimates`    : estimate obtained without each block, in block order.
/// - `pseudo_values`: pseudo-value of each block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEstimates {
    pub full         : f64,
    pub estimates    : Vec<f64>,
    pub pseudo_values: Vec<Pseudovalue>,
    observations     : usize,
    ranges           : Vec<std::ops::Range<usize>>,
}

impl JackknifeBlocks {
    /// Partition `observations` indices into blocks of `block_size`.
    ///
    /// # Errors
    /// - `InvalidBlockSize` if `block_size` is zero.
    pub fn new(observations: usize, block_size: usize) -> Result<JackknifeBlocks, JackknifeError> {
        if block_size == 0 {
            return Err(JackknifeError::InvalidBlockSize(block_size))
        }
        let blocks = (0..observations).step_by(block_size)
            .map(|start| JackknifeBlock::new(start, usize::min(start + block_size, observations)))
            .collect();
        Ok(JackknifeBlocks{blocks, observations})
    }

    /// Number of blocks (`g`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn blocks(&self) -> &[JackknifeBlock] {
        &self.blocks
    }

    /// Search for the block containing the observation found at `index`.
    #[must_use]
    pub fn find_block(&self, index: usize) -> Option<&JackknifeBlock> {
        self.blocks.iter().find(|block| block.contains(index))
    }

    /// Copy `data`, without the observations held within block `j`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `j` is not a valid block index.
    /// - `SizeMismatch` if `data` does not match the number of observations these blocks were built for.
    pub fn leave_block_out<T: Clone>(&self, data: &[T], j: usize) -> Result<Vec<T>, JackknifeError> {
        self.check_len(data)?;
        let block = self.blocks.get(j).ok_or(JackknifeError::IndexOutOfRange{index: j, len: self.len()})?;
        let mut subsample = Vec::with_capacity(data.len() - block.size());
        subsample.extend_from_slice(&data[..block.range.start]);
        subsample.extend_from_slice(&data[block.range.end..]);
        Ok(subsample)
    }

    fn check_len<T>(&self, data: &[T]) -> Result<(), JackknifeError> {
        match data.len() == self.observations {
            true  => Ok(()),
            false => Err(JackknifeError::SizeMismatch{expected: self.observations, found: data.len()}),
        }
    }

    /// Apply `estimator` on `data`, and on `data` deprived of each block.
    ///
    /// # Errors
    /// - `SizeMismatch` if `data` does not match the number of observations of these blocks.
    /// - `InsufficientObservations` if there are less than two blocks.
    /// - `FullSampleFailure` or `EstimatorFailure` (carrying the block index) if the estimator fails.
    pub fn compute<T, E>(&self, data: &[T], estimator: &E) -> Result<BlockEstimates, JackknifeError>
    where   T: Clone,
            E: Estimator<T, Output = f64> + ?Sized,
    {
        self.check_len(data)?;
        if self.len() < 2 {
            return Err(JackknifeError::InsufficientObservations{required: 2, found: self.len()})
        }

        debug!("Applying estimator on the full sequence of {} observations", data.len());
        let full = estimator.estimate(data).map_err(|e| JackknifeError::FullSampleFailure(e.into()))?;

        let mut estimates     = Vec::with_capacity(self.len());
        let mut pseudo_values = Vec::with_capacity(self.len());
        for (index, block) in self.blocks.iter().enumerate() {
            let subsample = self.leave_block_out(data, index)?;
            trace!("Applying estimator without block {index} ({:?})", block.range);
            let theta_minus_j = estimator.estimate(&subsample)
                .map_err(|e| JackknifeError::EstimatorFailure{index, source: e.into()})?;
            pseudo_values.push(block.compute_unequal_delete_m_pseudo_value(full, theta_minus_j, self.observations));
            estimates.push(theta_minus_j);
        }

        let ranges = self.blocks.iter().map(|block| block.range.clone()).collect();
        Ok(BlockEstimates{full, estimates, pseudo_values, observations: self.observations, ranges})
    }
}

impl BlockEstimates {
    /// Delete-m jackknife estimate: `sum_j theta_j / hj`
    #[must_use]
    pub fn corrected(&self) -> f64 {
        self.pseudo_values.iter().map(Pseudovalue::weighted_pseudovalue).sum()
    }

    /// Delete-m jackknife variance: `1/g * sum_j (theta_j - theta_jk)^2 / (hj - 1)`
    #[must_use]
    pub fn variance(&self) -> f64 {
        let theta_jk = self.corrected();
        let sum: f64 = self.pseudo_values.iter()
            .map(|pseudo| (pseudo.theta_j - theta_jk).powi(2) / (pseudo.hj - 1.0))
            .sum();
        sum / self.pseudo_values.len() as f64
    }

    #[must_use]
    pub fn summary(&self) -> JackknifeSummary {
        let jackknife = self.corrected();
        let variance  = self.variance();
        JackknifeSummary {
            observations: self.observations,
            estimate    : self.full,
            jackknife,
            bias        : self.full - jackknife,
            variance,
            std_err     : variance.sqrt(),
        }
    }

    /// One `Replicate` per left-out block, in block order.
    #[must_use]
    pub fn replicates(&self) -> Vec<Replicate> {
        self.ranges.iter()
            .zip(self.estimates.iter().zip(&self.pseudo_values))
            .map(|(range, (&estimate, pseudo))| Replicate{left_out: range.clone(), estimate, pseudo_value: pseudo.theta_j})
            .collect()
    }
}

impl Display for JackknifeBlocks {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.blocks.iter().try_fold((), |(), block| writeln!(f, "{block}"))
    }
}
