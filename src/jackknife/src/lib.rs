//! Jackknife resampling of arbitrary estimators.
//!
//! Given a sequence of observations and a black-box [`Estimator`], this crate builds the
//! leave-one-out subsamples of the sequence, applies the estimator on each of them, and derives the
//! bias-corrected jackknife estimate and the jackknife variance.
//!
//! # Example
//! ```
//! use jackknife::{JackknifeEstimates, Infallible};
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let mean = Infallible(|sample: &[f64]| sample.iter().sum::<f64>() / sample.len() as f64);
//!
//! let summary = JackknifeEstimates::compute(&data, &mean)?.summary()?;
//! assert!((summary.jackknife - 5.5).abs() < 1e-9);
//! assert!((summary.variance - 0.916_666_666_7).abs() < 1e-9);
//! # Ok::<(), jackknife::JackknifeError>(())
//! ```

pub const RANGE_FORMAT_LEN: usize = 10;
pub const COUNT_FORMAT_LEN: usize = 8;
pub const VALUE_FORMAT_LEN: usize = 12;
pub const VALUE_PRECISION : usize = 6;

mod error;
pub use error::JackknifeError;

mod value;
pub use value::{JackknifeValue, mean_value};

mod estimator;
pub use estimator::{Estimator, Infallible};

mod subsample;
pub use subsample::{leave_one_out, fill_leave_one_out, leave_one_out_subsamples, LeaveOneOut};

mod estimates;
pub use estimates::{jackknife_estimates, par_jackknife_estimates, thread_pool};

mod correction;
pub use correction::{jackknife_bias, bias_corrected_estimate, pseudo_values};

mod variance;
pub use variance::{jackknife_variance, jackknife_standard_error};

mod summary;
pub use summary::{JackknifeEstimates, JackknifeSummary, Replicate};

pub mod blocks;
pub use blocks::{JackknifeBlock, JackknifeBlocks, BlockEstimates};
