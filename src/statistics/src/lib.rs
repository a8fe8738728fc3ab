use std::fmt::{self, Display, Formatter};

use clap::ArgEnum;
use itertools::Itertools;
use serde::{Serialize, Deserialize};

use jackknife::Estimator;

mod error;
pub use error::StatisticError;

/// Built-in scalar estimators, selectable by name from the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    Mean,
    Median,
    Variance,
    SampleVariance,
    StdDev,
}

impl Default for Statistic {
    fn default() -> Self {Self::Mean}
}

impl Display for Statistic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean           => write!(f, "Mean"),
            Self::Median         => write!(f, "Median"),
            Self::Variance       => write!(f, "Plug-in variance"),
            Self::SampleVariance => write!(f, "Sample variance"),
            Self::StdDev         => write!(f, "Standard deviation"),
        }
    }
}

impl Statistic {
    /// Compute this statistic from `sample`.
    ///
    /// # Errors
    /// See the corresponding function of this crate.
    pub fn apply(&self, sample: &[f64]) -> Result<f64, StatisticError> {
        match self {
            Self::Mean           => mean(sample),
            Self::Median         => median(sample),
            Self::Variance       => variance(sample),
            Self::SampleVariance => sample_variance(sample),
            Self::StdDev         => std_dev(sample),
        }
    }
}

impl Estimator<f64> for Statistic {
    type Output = f64;
    type Error  = StatisticError;

    fn estimate(&self, sample: &[f64]) -> Result<f64, StatisticError> {
        self.apply(sample)
    }
}

fn require(sample: &[f64], required: usize) -> Result<(), StatisticError> {
    match sample.len() {
        0                   => Err(StatisticError::EmptySample),
        n if n < required   => Err(StatisticError::InsufficientSample{required, found: n}),
        _                   => Ok(()),
    }
}

/// Arithmetic mean.
///
/// # Errors
/// - `EmptySample` if `sample` is empty.
pub fn mean(sample: &[f64]) -> Result<f64, StatisticError> {
    require(sample, 1)?;
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Median. For samples of even length, the average of the two middle values.
///
/// # Errors
/// - `EmptySample` if `sample` is empty.
pub fn median(sample: &[f64]) -> Result<f64, StatisticError> {
    require(sample, 1)?;
    let sorted = sample.iter().copied().sorted_by(f64::total_cmp).collect::<Vec<f64>>();
    let mid = sorted.len() / 2;
    match sorted.len() % 2 {
        0 => Ok((sorted[mid - 1] + sorted[mid]) / 2.0),
        _ => Ok(sorted[mid]),
    }
}

/// Sum of squared deviations from the mean.
fn sum_of_squares(sample: &[f64]) -> Result<f64, StatisticError> {
    let mu = mean(sample)?;
    Ok(sample.iter().map(|x| (x - mu).powi(2)).sum())
}

/// Plug-in (population) variance, i.e. the sum of squares divided by `n`.
///
/// # Errors
/// - `EmptySample` if `sample` is empty.
pub fn variance(sample: &[f64]) -> Result<f64, StatisticError> {
    Ok(sum_of_squares(sample)? / sample.len() as f64)
}

/// Unbiased sample variance, i.e. the sum of squares divided by `n - 1`.
///
/// # Errors
/// - `EmptySample` if `sample` is empty.
/// - `InsufficientSample` if `sample` holds a single observation.
pub fn sample_variance(sample: &[f64]) -> Result<f64, StatisticError> {
    require(sample, 2)?;
    Ok(sum_of_squares(sample)? / (sample.len() - 1) as f64)
}

/// Sample standard deviation (square root of [`sample_variance`]).
///
/// # Errors
/// See [`sample_variance`].
pub fn std_dev(sample: &[f64]) -> Result<f64, StatisticError> {
    sample_variance(sample).map(f64::sqrt)
}
