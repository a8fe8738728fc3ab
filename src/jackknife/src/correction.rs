use crate::{JackknifeError, JackknifeValue};
use crate::value::mean_value;

/// Ensure every jackknife estimate shares the shape of `full_estimate`.
fn check_shapes<V: JackknifeValue>(full_estimate: &V, estimates: &[V]) -> Result<(), JackknifeError> {
    let expected = full_estimate.shape();
    match estimates.iter().map(JackknifeValue::shape).find(|&found| found != expected) {
        Some(found) => Err(JackknifeError::ShapeMismatch{expected, found}),
        None        => Ok(()),
    }
}

/// Mean of the jackknife estimate set, after checking it holds exactly `n` estimates, all shaped
/// like `full_estimate`.
fn checked_mean<V: JackknifeValue>(full_estimate: &V, estimates: &[V], n: usize) -> Result<V, JackknifeError> {
    if estimates.len() != n {
        return Err(JackknifeError::SizeMismatch{expected: n, found: estimates.len()})
    }
    check_shapes(full_estimate, estimates)?;
    mean_value(estimates).ok_or(JackknifeError::InsufficientObservations{required: 1, found: 0})
}

/// Jackknife estimate of the bias of `full_estimate`: `(n - 1) * (mean(estimates) - full_estimate)`
///
/// # Arguments
/// - `full_estimate`: estimator applied on the complete observation sequence.
/// - `estimates`    : jackknife estimate set, i.e. the estimator applied on each leave-one-out subsample.
/// - `n`            : number of observations of the complete sequence.
///
/// # Errors
/// - `SizeMismatch` if `estimates` does not contain exactly `n` values.
/// - `ShapeMismatch` if any estimate is not shaped like `full_estimate`.
/// - `InsufficientObservations` if `n` is zero.
pub fn jackknife_bias<V: JackknifeValue>(full_estimate: &V, estimates: &[V], n: usize) -> Result<V, JackknifeError> {
    let mean = checked_mean(full_estimate, estimates, n)?;
    Ok(mean.minus(full_estimate).scaled((n - 1) as f64))
}

/// Bias-corrected jackknife point estimate: `n * full_estimate - (n - 1) * mean(estimates)`
///
/// With a single observation, this degenerates to `full_estimate`.
///
/// # Errors
/// - `SizeMismatch` if `estimates` does not contain exactly `n` values.
/// - `ShapeMismatch` if any estimate is not shaped like `full_estimate`.
/// - `InsufficientObservations` if `n` is zero.
pub fn bias_corrected_estimate<V: JackknifeValue>(full_estimate: &V, estimates: &[V], n: usize) -> Result<V, JackknifeError> {
    let mean = checked_mean(full_estimate, estimates, n)?;
    Ok(full_estimate.scaled(n as f64).minus(&mean.scaled((n - 1) as f64)))
}

/// Jackknife pseudo-values: `n * full_estimate - (n - 1) * estimates[k]`, for each `k`.
///
/// The mean of the pseudo-values is the bias-corrected estimate.
///
/// # Errors
/// - `ShapeMismatch` if any estimate is not shaped like `full_estimate`.
pub fn pseudo_values<V: JackknifeValue>(full_estimate: &V, estimates: &[V]) -> Result<Vec<V>, JackknifeError> {
    check_shapes(full_estimate, estimates)?;
    Ok(unchecked_pseudo_values(full_estimate, estimates))
}

/// [`pseudo_values`], for values whose shapes are known to match (e.g. scalars).
pub(crate) fn unchecked_pseudo_values<V: JackknifeValue>(full_estimate: &V, estimates: &[V]) -> Vec<V> {
    let n = estimates.len() as f64;
    let weighted_full = full_estimate.scaled(n);
    estimates.iter()
        .map(|estimate| weighted_full.minus(&estimate.scaled(n - 1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const TOLERANCE: f64 = 1e-12;

    fn leave_one_out_means(data: &[f64]) -> Vec<f64> {
        let sum: f64 = data.iter().sum();
        let n = data.len() as f64;
        data.iter().map(|x| (sum - x) / (n - 1.0)).collect()
    }

    #[test]
    fn symmetric_data_has_no_bias() -> Result<(), JackknifeError> {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let estimates = leave_one_out_means(&data);
        let bias      = jackknife_bias(&5.5, &estimates, data.len())?;
        let corrected = bias_corrected_estimate(&5.5, &estimates, data.len())?;
        assert!(bias.abs() < TOLERANCE);
        assert!((corrected - 5.5).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn two_observations_reproduce_mean() -> Result<(), JackknifeError> {
        let (a, b): (f64, f64) = (3.25, -1.5);
        let mean = (a + b) / 2.0;
        let corrected = bias_corrected_estimate(&mean, &[b, a], 2)?;
        assert_eq!(corrected, mean);
        Ok(())
    }

    #[test]
    fn corrected_equals_full_minus_bias() -> Result<(), JackknifeError> {
        let estimates: Vec<f64> = (0..25).map(|_| fastrand::f64()).collect();
        let full = 0.42;
        let bias      = jackknife_bias(&full, &estimates, estimates.len())?;
        let corrected = bias_corrected_estimate(&full, &estimates, estimates.len())?;
        assert!(approx_eq!(f64, corrected, full - bias, epsilon = TOLERANCE));
        Ok(())
    }

    #[test]
    fn single_observation_is_degenerate() -> Result<(), JackknifeError> {
        assert_eq!(bias_corrected_estimate(&7.0, &[123.0], 1)?, 7.0);
        assert_eq!(jackknife_bias(&7.0, &[123.0], 1)?, 0.0);
        Ok(())
    }

    #[test]
    fn size_mismatch() {
        let result = bias_corrected_estimate(&1.0, &[1.0, 2.0, 3.0], 4);
        assert!(matches!(result, Err(JackknifeError::SizeMismatch{expected: 4, found: 3})));
        let result = jackknife_bias(&1.0, &[1.0, 2.0, 3.0], 2);
        assert!(matches!(result, Err(JackknifeError::SizeMismatch{expected: 2, found: 3})));
    }

    #[test]
    fn no_observation() {
        let result = bias_corrected_estimate::<f64>(&1.0, &[], 0);
        assert!(matches!(result, Err(JackknifeError::InsufficientObservations{required: 1, found: 0})));
    }

    #[test]
    fn vector_valued_estimates() -> Result<(), JackknifeError> {
        let estimates = [[1.0, 10.0], [3.0, 30.0]];
        let corrected = bias_corrected_estimate(&[2.0, 10.0], &estimates, 2)?;
        // 2 * full - mean
        assert_eq!(corrected, [2.0, 0.0]);
        Ok(())
    }

    #[test]
    fn pseudo_values_average_to_corrected_estimate() -> Result<(), JackknifeError> {
        let data: Vec<f64> = (0..40).map(|_| fastrand::f64() * 10.0).collect();
        let full = data.iter().map(|x| x * x).sum::<f64>() / data.len() as f64;
        let estimates: Vec<f64> = (0..data.len()).map(|k| {
            let sum: f64 = data.iter().enumerate().filter(|(i, _)| *i != k).map(|(_, x)| x * x).sum();
            sum / (data.len() - 1) as f64
        }).collect();

        let pseudo = pseudo_values(&full, &estimates)?;
        assert_eq!(pseudo.len(), data.len());
        let mean_pseudo = pseudo.iter().sum::<f64>() / pseudo.len() as f64;
        let corrected   = bias_corrected_estimate(&full, &estimates, data.len())?;
        assert!(approx_eq!(f64, mean_pseudo, corrected, epsilon = 1e-9));

        // Pseudo-values of a mean estimator are the observations themselves.
        let squares: Vec<f64> = data.iter().map(|x| x * x).collect();
        for (got, want) in pseudo.iter().zip(&squares) {
            assert!(approx_eq!(f64, *got, *want, epsilon = 1e-9));
        }
        Ok(())
    }

    #[test]
    fn ragged_vector_estimates() {
        let full      = vec![1.0, 2.0];
        let estimates = [vec![1.0], vec![2.0]];
        assert!(matches!(bias_corrected_estimate(&full, &estimates, 2), Err(JackknifeError::ShapeMismatch{expected: 2, found: 1})));
        assert!(matches!(jackknife_bias(&full, &estimates, 2), Err(JackknifeError::ShapeMismatch{expected: 2, found: 1})));
        assert!(matches!(pseudo_values(&full, &estimates), Err(JackknifeError::ShapeMismatch{expected: 2, found: 1})));

        let estimates = [vec![1.0, 4.0], vec![3.0]];
        assert!(matches!(bias_corrected_estimate(&full, &estimates, 2), Err(JackknifeError::ShapeMismatch{expected: 2, found: 1})));
    }

    #[test]
    fn vector_pseudo_values() -> Result<(), JackknifeError> {
        let pseudo = pseudo_values(&vec![2.0, 10.0], &[vec![1.0, 10.0], vec![3.0, 30.0]])?;
        assert_eq!(pseudo, vec![vec![3.0, 10.0], vec![1.0, -10.0]]);
        Ok(())
    }
}
