mod fixture;
#[allow(unused_imports)]
pub use fixture::Fixture;

mod jackknife_runner;
pub use jackknife_runner::{JackknifeRunner, JackknifeRunnerBuilder};

/// Assert that two floating point values are equal, up to the precision of output files.
#[macro_export]
macro_rules! assert_field_eq {
    ($got:expr, $want:expr) => {
        let got: f64 = $got.parse().unwrap_or_else(|_| panic!("'{}' is not a floating point value", $got));
        assert!((got - $want).abs() < 1e-6, "got {got}, want {}", $want);
    };
}
