//! Exploratory Analysis of Housing-Price Data
//!
//! Loads a delimited housing dataset with Polars, cleans it, draws three
//! charts and summarises the distribution of one numeric column.
//!
//! # Overview
//!
//! - **Loading**: CSV with header, schema inferred from the whole file
//! - **Preprocessing**: identifier columns dropped, numeric gaps filled with
//!   the column median, descriptive statistics and correlations summarised
//! - **Charts**: living-area/price scatter, mean price per neighbourhood,
//!   correlation heatmap, each written as PNG
//! - **Moments**: mean, standard deviation, skewness and excess kurtosis,
//!   with a plain-language reading of the shape
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use housing_eda::{AnalysisConfig, AnalysisPipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("data.csv")
//!     .output_dir("charts")
//!     .build()?;
//!
//! let outcome = AnalysisPipeline::new(config)?.run()?;
//!
//! println!("{}", outcome.preprocessing.description);
//! println!("{}", outcome.report);
//! ```
//!
//! # Individual stages
//!
//! Each stage can be used on its own:
//!
//! ```rust,ignore
//! use housing_eda::{load_dataset, Preprocessor, compute_moments, SkewnessEstimator};
//!
//! let mut df = load_dataset("data.csv")?;
//! Preprocessor::default().run(&mut df)?;
//! let moments = compute_moments(&df, "SalePrice", SkewnessEstimator::Adjusted)?;
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod preprocess;
pub mod reporting;
pub mod stats;
pub mod utils;
pub mod visualize;

// Re-exports for convenient access
pub use config::{
    AnalysisConfig, AnalysisConfigBuilder, ChartSize, ConfigValidationError, SkewnessEstimator,
};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use loader::load_dataset;
pub use pipeline::{AnalysisOutcome, AnalysisPipeline};
pub use preprocess::{Imputation, MedianImputer, PreprocessingSummary, Preprocessor};
pub use reporting::{MomentsReport, ReportFormat, SkewShape, TailShape, write_report};
pub use stats::{CorrelationMatrix, Moments, compute_moments, describe};
pub use visualize::{
    CategoryMean, ChartArtifact, ChartKind, Figure, plot_categorical, plot_correlation_heatmap, plot_relational,
    plot_statistical,
};
