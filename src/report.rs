use std::fmt::{self, Display, Formatter};

use jackknife::{JackknifeSummary, Replicate};

/// Width of the column-name field within `.jackknife` files.
pub const NAME_FORMAT_LEN: usize = 16;

/// Jackknife results of a single column of observations.
/// - `name`      : column name.
/// - `summary`   : bias-corrected estimate, bias and variance.
/// - `replicates`: per-replicate estimates and pseudo-values. Only written with `--print-pseudovalues`
#[derive(Debug, Clone)]
pub struct ColumnReport {
    pub name       : String,
    pub summary    : JackknifeSummary,
    pub replicates : Vec<Replicate>,
}

impl ColumnReport {
    #[must_use]
    pub fn header() -> String {
        format!("{: <NAME_FORMAT_LEN$} - {}", "Column", JackknifeSummary::header())
    }
}

impl Display for ColumnReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{: <NAME_FORMAT_LEN$} - {}", self.name, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_header() {
        let report = ColumnReport {
            name: "height".to_string(),
            summary: JackknifeSummary{observations: 3, estimate: 1.0, jackknife: 1.0, bias: 0.0, variance: 0.25, std_err: 0.5},
            replicates: Vec::new(),
        };
        let header = ColumnReport::header();
        let line   = report.to_string();
        assert_eq!(header.split(" - ").count(), line.split(" - ").count());
        assert!(line.starts_with(&format!("{: <NAME_FORMAT_LEN$} - 3 ", "height")));
    }
}
