//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the fixed housing analysis: read `data.csv`, drop
//! `Order`/`PID`, plot against `SalePrice`, and summarise `SalePrice`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input dataset, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data.csv";

/// Identifier columns removed before analysis.
pub const DEFAULT_IDENTIFIER_COLUMNS: [&str; 2] = ["Order", "PID"];

/// Estimator used for sample skewness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SkewnessEstimator {
    /// Adjusted Fisher-Pearson coefficient `G1 = g1 * sqrt(n(n-1)) / (n-2)`
    #[default]
    Adjusted,
    /// Biased population coefficient `g1 = m3 / m2^1.5`
    Population,
}

/// Pixel dimensions of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use housing_eda::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/ames.csv")
///     .output_dir("charts")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Delimited dataset to load.
    /// Default: "data.csv"
    pub input_path: PathBuf,

    /// Directory the chart images are written to.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Columns removed by the preprocessor when present.
    /// Default: ["Order", "PID"]
    pub identifier_columns: Vec<String>,

    /// Column summarised by the analyzer and reporter.
    /// Default: "SalePrice"
    pub target_column: String,

    /// Price column on the y axis of the scatter and bar charts.
    /// Default: "SalePrice"
    pub price_column: String,

    /// Column on the x axis of the scatter chart.
    /// Default: "Gr Liv Area"
    pub area_column: String,

    /// Grouping column for the bar chart.
    /// Default: "Neighborhood"
    pub category_column: String,

    /// Skewness estimator used by the analyzer.
    /// Default: Adjusted
    pub skewness_estimator: SkewnessEstimator,

    /// Number of correlation-matrix rows printed after preprocessing.
    /// Default: 5
    pub correlation_preview_rows: usize,

    /// Default: 800x600
    pub relational_size: ChartSize,

    /// Default: 1200x600
    pub categorical_size: ChartSize,

    /// Default: 1200x800
    pub statistical_size: ChartSize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            identifier_columns: DEFAULT_IDENTIFIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target_column: "SalePrice".to_string(),
            price_column: "SalePrice".to_string(),
            area_column: "Gr Liv Area".to_string(),
            category_column: "Neighborhood".to_string(),
            skewness_estimator: SkewnessEstimator::default(),
            correlation_preview_rows: 5,
            relational_size: ChartSize::new(800, 600),
            categorical_size: ChartSize::new(1200, 600),
            statistical_size: ChartSize::new(1200, 800),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("target_column", &self.target_column),
            ("price_column", &self.price_column),
            ("area_column", &self.area_column),
            ("category_column", &self.category_column),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        for (field, size) in [
            ("relational_size", self.relational_size),
            ("categorical_size", self.categorical_size),
            ("statistical_size", self.statistical_size),
        ] {
            if size.width < 200 || size.height < 200 {
                return Err(ConfigValidationError::ChartTooSmall {
                    field: field.to_string(),
                    width: size.width,
                    height: size.height,
                });
            }
        }

        if self.correlation_preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(
                self.correlation_preview_rows,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),

    #[error("Chart size for '{field}' is {width}x{height} (both sides must be at least 200 px)")]
    ChartTooSmall {
        field: String,
        width: u32,
        height: u32,
    },

    #[error("Invalid correlation preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),
}

impl From<ConfigValidationError> for crate::error::AnalysisError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    identifier_columns: Option<Vec<String>>,
    target_column: Option<String>,
    price_column: Option<String>,
    area_column: Option<String>,
    category_column: Option<String>,
    skewness_estimator: Option<SkewnessEstimator>,
    correlation_preview_rows: Option<usize>,
    relational_size: Option<ChartSize>,
    categorical_size: Option<ChartSize>,
    statistical_size: Option<ChartSize>,
}

impl AnalysisConfigBuilder {
    /// Set the dataset to load.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory chart images are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Replace the list of identifier columns dropped during preprocessing.
    pub fn identifier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the column whose moments are reported.
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    pub fn price_column(mut self, column: impl Into<String>) -> Self {
        self.price_column = Some(column.into());
        self
    }

    pub fn area_column(mut self, column: impl Into<String>) -> Self {
        self.area_column = Some(column.into());
        self
    }

    pub fn category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    /// Choose the skewness estimator.
    pub fn skewness_estimator(mut self, estimator: SkewnessEstimator) -> Self {
        self.skewness_estimator = Some(estimator);
        self
    }

    /// Set how many correlation rows are shown after preprocessing.
    pub fn correlation_preview_rows(mut self, rows: usize) -> Self {
        self.correlation_preview_rows = Some(rows);
        self
    }

    pub fn relational_size(mut self, width: u32, height: u32) -> Self {
        self.relational_size = Some(ChartSize::new(width, height));
        self
    }

    pub fn categorical_size(mut self, width: u32, height: u32) -> Self {
        self.categorical_size = Some(ChartSize::new(width, height));
        self
    }

    pub fn statistical_size(mut self, width: u32, height: u32) -> Self {
        self.statistical_size = Some(ChartSize::new(width, height));
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            identifier_columns: self
                .identifier_columns
                .unwrap_or(defaults.identifier_columns),
            target_column: self.target_column.unwrap_or(defaults.target_column),
            price_column: self.price_column.unwrap_or(defaults.price_column),
            area_column: self.area_column.unwrap_or(defaults.area_column),
            category_column: self.category_column.unwrap_or(defaults.category_column),
            skewness_estimator: self.skewness_estimator.unwrap_or_default(),
            correlation_preview_rows: self
                .correlation_preview_rows
                .unwrap_or(defaults.correlation_preview_rows),
            relational_size: self.relational_size.unwrap_or(defaults.relational_size),
            categorical_size: self.categorical_size.unwrap_or(defaults.categorical_size),
            statistical_size: self.statistical_size.unwrap_or(defaults.statistical_size),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data.csv"));
        assert_eq!(config.identifier_columns, vec!["Order", "PID"]);
        assert_eq!(config.target_column, "SalePrice");
        assert_eq!(config.area_column, "Gr Liv Area");
        assert_eq!(config.category_column, "Neighborhood");
        assert_eq!(config.skewness_estimator, SkewnessEstimator::Adjusted);
        assert_eq!(config.correlation_preview_rows, 5);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = AnalysisConfig::builder().build().unwrap();
        let default = AnalysisConfig::default();
        assert_eq!(built.input_path, default.input_path);
        assert_eq!(built.output_dir, default.output_dir);
        assert_eq!(built.relational_size, default.relational_size);
        assert_eq!(built.statistical_size, ChartSize::new(1200, 800));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .input_path("ames.csv")
            .output_dir("charts")
            .identifier_columns(["Id"])
            .target_column("Lot Area")
            .skewness_estimator(SkewnessEstimator::Population)
            .correlation_preview_rows(3)
            .categorical_size(1600, 700)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("ames.csv"));
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.identifier_columns, vec!["Id"]);
        assert_eq!(config.target_column, "Lot Area");
        assert_eq!(config.skewness_estimator, SkewnessEstimator::Population);
        assert_eq!(config.correlation_preview_rows, 3);
        assert_eq!(config.categorical_size, ChartSize::new(1600, 700));
    }

    #[test]
    fn test_validation_empty_column() {
        let result = AnalysisConfig::builder().target_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnName(field) if field == "target_column"
        ));
    }

    #[test]
    fn test_validation_chart_too_small() {
        let result = AnalysisConfig::builder().relational_size(100, 600).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ChartTooSmall { .. }
        ));
    }

    #[test]
    fn test_validation_zero_preview_rows() {
        let result = AnalysisConfig::builder().correlation_preview_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPreviewRows(0)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.target_column, deserialized.target_column);
        assert_eq!(config.skewness_estimator, deserialized.skewness_estimator);
        assert_eq!(config.categorical_size, deserialized.categorical_size);
    }
}
