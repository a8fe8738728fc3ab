use log::trace;
use rayon::prelude::*;

use crate::{Estimator, JackknifeError};
use crate::subsample::{fill_leave_one_out, leave_one_out};

/// Apply `estimator` on every leave-one-out subsample of `data`, in index order.
///
/// The estimator is invoked exactly once per subsample. Subsamples are rebuilt from the original
/// sequence within a single reusable buffer, so the working memory stays proportional to `data.len()`.
///
/// # Errors
/// - `EstimatorFailure` carrying the index of the first subsample on which the estimator failed.
///   No partial result is ever returned.
pub fn jackknife_estimates<T, E>(data: &[T], estimator: &E) -> Result<Vec<E::Output>, JackknifeError>
where   T: Clone,
        E: Estimator<T> + ?Sized,
{
    let mut estimates = Vec::with_capacity(data.len());
    let mut subsample = Vec::with_capacity(data.len().saturating_sub(1));
    for index in 0..data.len() {
        fill_leave_one_out(data, index, &mut subsample)?;
        trace!("Applying estimator on leave-one-out subsample #{index}");
        let estimate = estimator.estimate(&subsample)
            .map_err(|e| JackknifeError::EstimatorFailure{index, source: e.into()})?;
        estimates.push(estimate);
    }
    Ok(estimates)
}

/// Parallel counterpart of [`jackknife_estimates`], running on the current `rayon` thread pool.
///
/// Estimates are returned in index order, and are identical to the ones obtained through
/// sequential application, provided the estimator is deterministic. When several subsamples fail,
/// the reported `EstimatorFailure` is the one with the lowest index.
///
/// # Errors
/// - `EstimatorFailure`, see [`jackknife_estimates`].
pub fn par_jackknife_estimates<T, E>(data: &[T], estimator: &E) -> Result<Vec<E::Output>, JackknifeError>
where   T: Clone + Sync,
        E: Estimator<T> + Sync + ?Sized,
        E::Output: Send,
{
    let results: Vec<Result<E::Output, JackknifeError>> = (0..data.len())
        .into_par_iter()
        .map(|index| {
            let subsample = leave_one_out(data, index)?;
            trace!("Applying estimator on leave-one-out subsample #{index}");
            estimator.estimate(&subsample)
                .map_err(|e| JackknifeError::EstimatorFailure{index, source: e.into()})
        })
        .collect();

    results.into_iter().collect()
}

/// Build a dedicated thread pool for parallel jackknife estimation.
///
/// # Errors
/// - `BuildThreadPool` if `rayon` fails to spawn the requested threads.
pub fn thread_pool(threads: usize) -> Result<rayon::ThreadPool, JackknifeError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(JackknifeError::BuildThreadPool)
}
