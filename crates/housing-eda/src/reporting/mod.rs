//! Human-readable reporting of the analysis results.
//!
//! [`MomentsReport`] pairs a column's [`Moments`](crate::stats::Moments)
//! with its skew and tail classification. It renders as plain text through
//! `Display` or as JSON through `serde`.
//!
//! # Example
//!
//! ```rust,ignore
//! use housing_eda::reporting::{MomentsReport, ReportFormat, write_report};
//!
//! let report = MomentsReport::new("SalePrice", moments);
//! write_report(&mut std::io::stdout(), &report, ReportFormat::Text)?;
//! ```

mod summary;

pub use summary::{KURTOSIS_THRESHOLD, MomentsReport, SKEW_THRESHOLD, SkewShape, TailShape};

use crate::error::Result;
use std::io::Write;

/// Output format for [`write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Write `report` to `out` in the requested format, newline-terminated.
pub fn write_report<W: Write>(out: &mut W, report: &MomentsReport, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => writeln!(out, "{}", report)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Moments;

    fn report() -> MomentsReport {
        MomentsReport::new(
            "SalePrice",
            Moments {
                mean: 2_612_500.0,
                std_dev: 4_925_000.0,
                skewness: 2.0,
                excess_kurtosis: -0.67,
            },
        )
    }

    #[test]
    fn test_write_text() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(), ReportFormat::Text).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Mean = 2612500.00"));
        assert!(text.ends_with("right skewed and mesokurtic.\n"));
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(), ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["skew"], "right_skewed");
        assert_eq!(value["moments"]["mean"], 2_612_500.0);
    }
}
