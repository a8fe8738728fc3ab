use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatisticError {
    #[error("Cannot compute a statistic from an empty sample")]
    EmptySample,

    #[error("At least {required} observations are required, found {found}")]
    InsufficientSample{required: usize, found: usize},
}
