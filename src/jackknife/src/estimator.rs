use std::convert::Infallible as Never;

/// A black-box statistic computed over a sequence of observations.
///
/// The jackknife never looks inside an estimator: it only calls it once per subsample and
/// combines the returned values. Estimators are expected to be deterministic and free of side
/// effects, so that applying them sequentially or concurrently yields the same estimates.
///
/// Any closure `Fn(&[T]) -> Result<V, E>` is an estimator. Plain `Fn(&[T]) -> V` closures
/// can be wrapped within [`Infallible`].
pub trait Estimator<T> {
    /// Value produced by the estimator (a scalar, or a fixed-shape vector).
    type Output;

    /// Failure raised by the estimator. Wrapped within `JackknifeError::EstimatorFailure`
    type Error: Into<anyhow::Error>;

    /// Apply the estimator on `sample`.
    ///
    /// # Errors
    /// Whenever the statistic cannot be computed from `sample`.
    fn estimate(&self, sample: &[T]) -> Result<Self::Output, Self::Error>;
}

impl<T, V, E, F> Estimator<T> for F
where   F: Fn(&[T]) -> Result<V, E>,
        E: Into<anyhow::Error>,
{
    type Output = V;
    type Error  = E;

    fn estimate(&self, sample: &[T]) -> Result<V, E> {
        self(sample)
    }
}

/// Adapter turning an infallible closure into an [`Estimator`].
///
/// # Example
/// ```
/// use jackknife::{Estimator, Infallible};
/// let sum = Infallible(|sample: &[f64]| sample.iter().sum::<f64>());
/// assert_eq!(sum.estimate(&[1.0, 2.0]), Ok(3.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Infallible<F>(pub F);

impl<T, V, F> Estimator<T> for Infallible<F>
where   F: Fn(&[T]) -> V,
{
    type Output = V;
    type Error  = Never;

    fn estimate(&self, sample: &[T]) -> Result<V, Never> {
        Ok((self.0)(sample))
    }
}
