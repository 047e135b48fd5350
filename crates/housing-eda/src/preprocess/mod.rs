//! Table cleaning before analysis.
//!
//! The preprocessor:
//! - drops identifier columns (ignored when absent)
//! - fills missing numeric values with the column median
//! - summarises the cleaned table (descriptive statistics and the first
//!   rows of the correlation matrix)

mod imputer;

pub use imputer::{Imputation, MedianImputer};

use crate::config::AnalysisConfig;
use crate::error::{Result, ResultExt};
use crate::stats::{CorrelationMatrix, describe};
use polars::prelude::*;
use tracing::{debug, info};

/// What a preprocessing pass did, plus the summary tables it produced.
#[derive(Debug, Clone)]
pub struct PreprocessingSummary {
    pub dropped_columns: Vec<String>,
    pub imputations: Vec<Imputation>,
    /// `count, mean, std, min, 25%, 50%, 75%, max` per numeric column.
    pub description: DataFrame,
    /// Leading rows of the numeric correlation matrix.
    pub correlation_preview: DataFrame,
}

/// Cleans a table in place.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    identifier_columns: Vec<String>,
    correlation_preview_rows: usize,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl Preprocessor {
    pub fn new(identifier_columns: Vec<String>, correlation_preview_rows: usize) -> Self {
        Self {
            identifier_columns,
            correlation_preview_rows,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.identifier_columns.clone(),
            config.correlation_preview_rows,
        )
    }

    /// Clean `df` and summarise the result.
    ///
    /// Row count never changes; only the configured identifier columns may
    /// be removed.
    pub fn run(&self, df: &mut DataFrame) -> Result<PreprocessingSummary> {
        let rows_before = df.height();

        let dropped_columns = self.drop_identifiers(df)?;
        let imputations = MedianImputer::apply(df).context("imputing numeric medians")?;

        let description = describe(df).context("describing numeric columns")?;
        let correlation_preview = CorrelationMatrix::from_dataframe(df)
            .and_then(|corr| corr.head(self.correlation_preview_rows))
            .context("correlating numeric columns")?;

        debug_assert_eq!(rows_before, df.height());
        info!(
            "Preprocessing complete: {:?}, {} column(s) dropped, {} column(s) imputed",
            df.shape(),
            dropped_columns.len(),
            imputations.len()
        );
        debug!("Descriptive statistics:\n{}", description);
        debug!("Correlation preview:\n{}", correlation_preview);

        Ok(PreprocessingSummary {
            dropped_columns,
            imputations,
            description,
            correlation_preview,
        })
    }

    /// Remove identifier columns that exist; returns the names removed.
    pub fn drop_identifiers(&self, df: &mut DataFrame) -> Result<Vec<String>> {
        let mut dropped = Vec::new();
        for name in &self.identifier_columns {
            if df.get_column_index(name).is_some() {
                df.drop_in_place(name)?;
                info!("Dropped identifier column '{}'", name);
                dropped.push(name.clone());
            } else {
                debug!("Identifier column '{}' not present, skipping", name);
            }
        }
        Ok(dropped)
    }
}
