//! The four descriptive moments of a single column.

use crate::config::SkewnessEstimator;
use crate::error::{AnalysisError, Result};
use crate::stats::descriptive::{mean, present_values, sample_std};
use crate::utils::numeric_values;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

/// Mean, standard deviation, skewness and excess kurtosis of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
}

impl Moments {
    /// Compute the moments of a complete sample.
    ///
    /// Needs at least three values with non-zero spread; `column` is only
    /// used in error messages.
    pub fn from_values(
        values: &[f64],
        estimator: SkewnessEstimator,
        column: &str,
    ) -> Result<Self> {
        let n = values.len();
        if n < 3 {
            return Err(AnalysisError::InsufficientData {
                column: column.to_string(),
                reason: format!("{} valid value(s), at least 3 required", n),
            });
        }

        let nf = n as f64;
        // n >= 3, both are Some
        let mean = mean(values).unwrap_or_default();
        let std_dev = sample_std(values).unwrap_or_default();

        let central = |power: i32| values.iter().map(|v| (v - mean).powi(power)).sum::<f64>() / nf;
        let m2 = central(2);
        let m3 = central(3);
        let m4 = central(4);

        let spread = m2.sqrt();
        if spread == 0.0 || spread <= 1e-12 * mean.abs() {
            return Err(AnalysisError::InsufficientData {
                column: column.to_string(),
                reason: "all values are identical".to_string(),
            });
        }

        let g1 = m3 / m2.powf(1.5);
        let skewness = match estimator {
            SkewnessEstimator::Population => g1,
            SkewnessEstimator::Adjusted => g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0),
        };
        let excess_kurtosis = m4 / (m2 * m2) - 3.0;

        Ok(Self {
            mean,
            std_dev,
            skewness,
            excess_kurtosis,
        })
    }
}

/// Compute [`Moments`] for `column`, ignoring missing values.
///
/// Fails if the column is absent, non-numeric, or has too few values.
pub fn compute_moments(
    df: &DataFrame,
    column: &str,
    estimator: SkewnessEstimator,
) -> Result<Moments> {
    let values = numeric_values(df, column)?;
    let present = present_values(&values);
    debug!(
        "Computing moments for '{}': {} of {} values present",
        column,
        present.len(),
        values.len()
    );

    if present.is_empty() {
        return Err(AnalysisError::NoValidValues(column.to_string()));
    }

    Moments::from_values(&present, estimator, column)
}
