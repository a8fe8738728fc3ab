use std::ops::Range;
use std::fmt::{self, Display, Formatter};

use super::super::{COUNT_FORMAT_LEN, RANGE_FORMAT_LEN};

/// Pseudo-value of a single delete-m jackknife block.
/// - `hj`     : `n / m_j`, the ratio between the total number of observations and the block size.
/// - `theta_j`: `hj * theta - (hj - 1) * theta_minus_j`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pseudovalue {
    pub hj     : f64,
    pub theta_j: f64,
}

impl Pseudovalue {
    /// Pseudo-value, weighted by its block contribution (`m_j / n`).
    #[must_use]
    pub fn weighted_pseudovalue(&self) -> f64 {
        self.theta_j / self.hj
    }
}

/// Contiguous block of observations, removed as a whole during delete-m jackknife resampling.
/// Implemented within struct `JackknifeBlocks`.
///
/// # Fields
/// - `range` : `[start, end[` indices of the observations held within this block.
///
/// # Traits :
///  - `Display`: Pretty print for file and/or console output. Recursively called by `JackknifeBlocks`
///    when it itself is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JackknifeBlock {
    pub range: Range<usize>,
}

impl JackknifeBlock {
    /// Instantiate a new Jackknife block from an interval
    /// # Arguments:
    /// - `start`: 0-based index of the first observation of the block.
    /// - `end`  : 0-based index following the last observation of the block.
    #[must_use]
    pub fn new(start: usize, end: usize) -> JackknifeBlock {
        JackknifeBlock{range: start..end}
    }

    /// Number of observations held within this block (`m_j`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.range.len()
    }

    /// Check whether the observation found at `index` belongs to this block.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    /// Compute the pseudo-value of this block, using the unequal delete-m jackknife formulation.
    ///
    /// # Arguments
    /// - `theta`        : estimate obtained from all observations.
    /// - `theta_minus_j`: estimate obtained from all observations, except those from this block.
    /// - `n`            : total number of observations.
    #[must_use]
    pub fn compute_unequal_delete_m_pseudo_value(&self, theta: f64, theta_minus_j: f64, n: usize) -> Pseudovalue {
        // Cast once, compute later...
        let n    = n as f64;
        let size = self.size() as f64;

        let hj      = n / size; // hj = n/m_j
        let theta_j = hj * theta - (hj - 1.0) * theta_minus_j;
        Pseudovalue{hj, theta_j}
    }
}

impl Display for JackknifeBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <RANGE_FORMAT_LEN$} - \
             {: <RANGE_FORMAT_LEN$} - \
             {: <COUNT_FORMAT_LEN$}",
            self.range.start,
            self.range.end,
            self.size(),
        )
    }
}
