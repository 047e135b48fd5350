//! Median imputation for numeric columns.

use crate::error::{AnalysisError, Result};
use crate::stats::{median, present_values};
use crate::utils::{fill_numeric_nulls, is_numeric_dtype, series_values};
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

/// One column filled by the imputer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imputation {
    pub column: String,
    pub median: f64,
    pub filled: usize,
}

/// Replaces missing numeric values with the column median.
pub struct MedianImputer;

impl MedianImputer {
    /// Impute every numeric column of `df` that has missing values.
    ///
    /// Non-numeric columns are left as they are, missing values included.
    /// Columns without gaps are not rewritten, so a second pass is a no-op.
    pub fn apply(df: &mut DataFrame) -> Result<Vec<Imputation>> {
        let targets: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| is_numeric_dtype(c.dtype()))
            .map(|c| c.name().to_string())
            .collect();

        let mut imputations = Vec::new();
        for name in targets {
            if let Some(imputation) = Self::apply_column(df, &name)? {
                imputations.push(imputation);
            }
        }
        Ok(imputations)
    }

    /// Impute a single numeric column; `None` when nothing was missing.
    pub fn apply_column(df: &mut DataFrame, col_name: &str) -> Result<Option<Imputation>> {
        let series = df
            .column(col_name)
            .map_err(|_| AnalysisError::ColumnNotFound(col_name.to_string()))?
            .as_materialized_series()
            .clone();

        let values = series_values(&series)?;
        let present = present_values(&values);
        let missing = values.len() - present.len();
        if missing == 0 {
            return Ok(None);
        }

        let median_val =
            median(&present).ok_or_else(|| AnalysisError::NoValidValues(col_name.to_string()))?;

        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        info!(
            "Filled {} missing value(s) in '{}' with median: {:.2}",
            missing, col_name, median_val
        );

        Ok(Some(Imputation {
            column: col_name.to_string(),
            median: median_val,
            filled: missing,
        }))
    }
}
