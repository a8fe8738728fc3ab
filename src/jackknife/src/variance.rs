use crate::JackknifeError;

/// Jackknife variance estimate of a scalar estimator: `(n - 1) / n * sum_k (estimates[k] - mean)^2`
///
/// Vector-valued estimators would require a covariance matrix and are not handled here.
/// Accumulation is performed in plain double precision.
///
/// # Errors
/// - `InsufficientObservations` if `estimates` contains less than two values.
pub fn jackknife_variance(estimates: &[f64]) -> Result<f64, JackknifeError> {
    let n = estimates.len();
    if n < 2 {
        return Err(JackknifeError::InsufficientObservations{required: 2, found: n})
    }

    let n = n as f64;
    let mean = estimates.iter().sum::<f64>() / n;
    let sum_of_squares: f64 = estimates.iter()
        .map(|estimate| (estimate - mean).powi(2))
        .sum();
    Ok((n - 1.0) / n * sum_of_squares)
}

/// Jackknife standard error: square root of [`jackknife_variance`].
///
/// # Errors
/// - `InsufficientObservations` if `estimates` contains less than two values.
pub fn jackknife_standard_error(estimates: &[f64]) -> Result<f64, JackknifeError> {
    jackknife_variance(estimates).map(f64::sqrt)
}
