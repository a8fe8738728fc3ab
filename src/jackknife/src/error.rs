use thiserror::Error;

#[derive(Error, Debug)]
pub enum JackknifeError {
    #[error("Cannot leave out index {index}: valid indices lie within [0, {len})")]
    IndexOutOfRange{index: usize, len: usize},

    #[error("Estimator failed on the leave-one-out subsample #{index}")]
    EstimatorFailure{index: usize, #[source] source: anyhow::Error},

    #[error("Estimator failed on the full observation sequence")]
    FullSampleFailure(#[source] anyhow::Error),

    #[error("Expected {expected} jackknife estimates, found {found}")]
    SizeMismatch{expected: usize, found: usize},

    #[error("Jackknife values do not share the same shape: expected {expected} components, found {found}")]
    ShapeMismatch{expected: usize, found: usize},

    #[error("At least {required} jackknife estimates are required, found {found}")]
    InsufficientObservations{required: usize, found: usize},

    #[error("Invalid jackknife block size ({0}). Block size must be greater than zero")]
    InvalidBlockSize(usize),

    #[error("Failed to instantiate threadpool")]
    BuildThreadPool(#[source] rayon::ThreadPoolBuildError),
}
