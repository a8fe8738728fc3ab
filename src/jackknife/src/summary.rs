use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use log::debug;

use crate::{Estimator, JackknifeError, JackknifeValue};
use crate::estimates::{jackknife_estimates, par_jackknife_estimates};
use crate::correction::{bias_corrected_estimate, jackknife_bias, pseudo_values, unchecked_pseudo_values};
use crate::variance::jackknife_variance;

use super::{COUNT_FORMAT_LEN, RANGE_FORMAT_LEN, VALUE_FORMAT_LEN, VALUE_PRECISION};

/// Full-sample estimate, along with its jackknife estimate set.
///
/// The estimate set is computed once, and shared by every downstream quantity (bias, corrected
/// estimate, pseudo-values, variance).
#[derive(Debug, Clone, PartialEq)]
pub struct JackknifeEstimates<V> {
    full      : V,
    estimates : Vec<V>,
}

impl<V: JackknifeValue> JackknifeEstimates<V> {
    /// Apply `estimator` on `data` and on each of its leave-one-out subsamples.
    ///
    /// # Errors
    /// - `InsufficientObservations` if `data` is empty.
    /// - `FullSampleFailure` if the estimator fails on the complete sequence.
    /// - `EstimatorFailure` if the estimator fails on any leave-one-out subsample.
    pub fn compute<T, E>(data: &[T], estimator: &E) -> Result<Self, JackknifeError>
    where   T: Clone,
            E: Estimator<T, Output = V> + ?Sized,
    {
        let full = Self::full_estimate(data, estimator)?;
        let estimates = jackknife_estimates(data, estimator)?;
        Ok(Self{full, estimates})
    }

    /// Parallel counterpart of [`JackknifeEstimates::compute`]. See [`par_jackknife_estimates`]
    ///
    /// # Errors
    /// Same as [`JackknifeEstimates::compute`].
    pub fn par_compute<T, E>(data: &[T], estimator: &E) -> Result<Self, JackknifeError>
    where   T: Clone + Sync,
            E: Estimator<T, Output = V> + Sync + ?Sized,
            V: Send,
    {
        let full = Self::full_estimate(data, estimator)?;
        let estimates = par_jackknife_estimates(data, estimator)?;
        Ok(Self{full, estimates})
    }

    fn full_estimate<T, E>(data: &[T], estimator: &E) -> Result<V, JackknifeError>
    where   E: Estimator<T, Output = V> + ?Sized,
    {
        if data.is_empty() {
            return Err(JackknifeError::InsufficientObservations{required: 1, found: 0})
        }
        debug!("Applying estimator on the full sequence of {} observations", data.len());
        estimator.estimate(data).map_err(|e| JackknifeError::FullSampleFailure(e.into()))
    }

    /// Number of observations (and thus of leave-one-out estimates).
    #[must_use]
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Estimator applied on the complete observation sequence.
    #[must_use]
    pub fn full(&self) -> &V {
        &self.full
    }

    /// Jackknife estimate set, in leave-one-out index order.
    #[must_use]
    pub fn estimates(&self) -> &[V] {
        &self.estimates
    }

    /// Jackknife estimate of the bias of [`full`](Self::full).
    ///
    /// # Errors
    /// - `ShapeMismatch` if the estimator returned values of different shapes.
    /// - `InsufficientObservations` if no observation was jackknifed.
    pub fn bias(&self) -> Result<V, JackknifeError> {
        jackknife_bias(&self.full, &self.estimates, self.len())
    }

    /// Bias-corrected jackknife point estimate.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the estimator returned values of different shapes.
    /// - `InsufficientObservations` if no observation was jackknifed.
    pub fn corrected(&self) -> Result<V, JackknifeError> {
        bias_corrected_estimate(&self.full, &self.estimates, self.len())
    }

    /// One pseudo-value per left-out observation, in index order.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the estimator returned values of different shapes.
    pub fn pseudo_values(&self) -> Result<Vec<V>, JackknifeError> {
        pseudo_values(&self.full, &self.estimates)
    }
}

impl JackknifeEstimates<f64> {
    /// # Errors
    /// - `InsufficientObservations` if less than two observations were jackknifed.
    pub fn variance(&self) -> Result<f64, JackknifeError> {
        jackknife_variance(&self.estimates)
    }

    /// # Errors
    /// - `InsufficientObservations` if less than two observations were jackknifed.
    pub fn standard_error(&self) -> Result<f64, JackknifeError> {
        self.variance().map(f64::sqrt)
    }

    /// Summarize the bias-corrected estimate and its variance.
    ///
    /// # Errors
    /// - `InsufficientObservations` if less than two observations were jackknifed.
    pub fn summary(&self) -> Result<JackknifeSummary, JackknifeError> {
        let variance = self.variance()?;
        Ok(JackknifeSummary {
            observations: self.len(),
            estimate    : self.full,
            jackknife   : self.corrected()?,
            bias        : self.bias()?,
            variance,
            std_err     : variance.sqrt(),
        })
    }

    /// One `Replicate` per left-out observation, in index order.
    #[must_use]
    pub fn replicates(&self) -> Vec<Replicate> {
        self.estimates.iter()
            .zip(unchecked_pseudo_values(&self.full, &self.estimates))
            .enumerate()
            .map(|(index, (&estimate, pseudo_value))| Replicate{left_out: index..index + 1, estimate, pseudo_value})
            .collect()
    }
}

/// Jackknife results of a scalar estimator.
///
/// # Fields
/// - `observations`: number of observations within the full sequence.
/// - `estimate`    : estimator applied on the full sequence.
/// - `jackknife`   : bias-corrected jackknife estimate.
/// - `bias`        : jackknife estimate of the bias of `estimate`.
/// - `variance`    : jackknife variance estimate.
/// - `std_err`     : jackknife standard error.
///
/// # Traits
/// - `Display`: pretty print, with fields separated by `" - "`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JackknifeSummary {
    pub observations: usize,
    pub estimate    : f64,
    pub jackknife   : f64,
    pub bias        : f64,
    pub variance    : f64,
    pub std_err     : f64,
}

impl JackknifeSummary {
    /// Header matching the `Display` implementation of this struct.
    #[must_use]
    pub fn header() -> String {
        format!(
            "{: <COUNT_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$}",
            "N", "Estimate", "Jackknife", "Bias", "Variance", "Std.Err"
        )
    }
}

impl Display for JackknifeSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <COUNT_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$}",
            self.observations,
            self.estimate,
            self.jackknife,
            self.bias,
            self.variance,
            self.std_err,
        )
    }
}

/// A single jackknife replicate: the observations that were left out, the estimate obtained
/// without them, and the corresponding pseudo-value.
#[derive(Debug, Clone, PartialEq)]
pub struct Replicate {
    pub left_out    : Range<usize>,
    pub estimate    : f64,
    pub pseudo_value: f64,
}

impl Replicate {
    #[must_use]
    pub fn header() -> String {
        format!(
            "{: <RANGE_FORMAT_LEN$} - \
             {: <RANGE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$}",
            "Start", "End", "Estimate", "Pseudo-value"
        )
    }
}

impl Display for Replicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "{: <RANGE_FORMAT_LEN$} - \
             {: <RANGE_FORMAT_LEN$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$} - \
             {: <VALUE_FORMAT_LEN$.VALUE_PRECISION$}",
            self.left_out.start,
            self.left_out.end,
            self.estimate,
            self.pseudo_value,
        )
    }
}
