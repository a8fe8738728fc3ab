/// Arithmetic required from an estimator output in order to be jackknifed.
///
/// Jackknife bias correction and pseudo-values only ever need to add, subtract and scale
/// estimates by a real factor, so any value living in a real vector space qualifies.
///
/// # Implementations
/// - `f64`, `f32`  : plain scalar estimators.
/// - `[f64; N]`    : fixed-shape vector estimators (e.g. a pair of regression coefficients)
/// - `Vec<f64>`    : element-wise. Operands must share the same [`shape`](JackknifeValue::shape).
pub trait JackknifeValue: Clone {
    /// Number of scalar components held by this value. Values can only be combined when their
    /// shapes match.
    #[must_use]
    fn shape(&self) -> usize {
        1
    }

    #[must_use]
    fn plus(&self, rhs: &Self) -> Self;

    #[must_use]
    fn minus(&self, rhs: &Self) -> Self;

    #[must_use]
    fn scaled(&self, factor: f64) -> Self;
}

impl JackknifeValue for f64 {
    fn plus(&self, rhs: &Self) -> Self   { self + rhs }
    fn minus(&self, rhs: &Self) -> Self  { self - rhs }
    fn scaled(&self, factor: f64) -> Self { self * factor }
}

impl JackknifeValue for f32 {
    fn plus(&self, rhs: &Self) -> Self   { self + rhs }
    fn minus(&self, rhs: &Self) -> Self  { self - rhs }
    #[allow(clippy::cast_possible_truncation)]
    fn scaled(&self, factor: f64) -> Self { (f64::from(*self) * factor) as f32 }
}

impl<const N: usize> JackknifeValue for [f64; N] {
    fn shape(&self) -> usize {
        N
    }

    fn plus(&self, rhs: &Self) -> Self {
        std::array::from_fn(|i| self[i] + rhs[i])
    }

    fn minus(&self, rhs: &Self) -> Self {
        std::array::from_fn(|i| self[i] - rhs[i])
    }

    fn scaled(&self, factor: f64) -> Self {
        self.map(|x| x * factor)
    }
}

impl JackknifeValue for Vec<f64> {
    fn shape(&self) -> usize {
        self.len()
    }

    fn plus(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.len(), rhs.len());
        self.iter().zip(rhs).map(|(a, b)| a + b).collect()
    }

    fn minus(&self, rhs: &Self) -> Self {
        debug_assert_eq!(self.len(), rhs.len());
        self.iter().zip(rhs).map(|(a, b)| a - b).collect()
    }

    fn scaled(&self, factor: f64) -> Self {
        self.iter().map(|x| x * factor).collect()
    }
}

/// Arithmetic mean of a set of estimates. Returns `None` if `values` is empty, or if its members
/// do not share the same shape.
pub fn mean_value<V: JackknifeValue>(values: &[V]) -> Option<V> {
    let (first, rest) = values.split_first()?;
    if rest.iter().any(|value| value.shape() != first.shape()) {
        return None
    }
    let sum = rest.iter().fold(first.clone(), |acc, value| acc.plus(value));
    Some(sum.scaled(1.0 / values.len() as f64))
}
