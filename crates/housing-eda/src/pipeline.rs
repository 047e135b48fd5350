//! The analysis run: load, preprocess, chart, summarise.

use crate::config::{AnalysisConfig, ChartSize};
use crate::error::{Result, ResultExt};
use crate::loader::load_dataset;
use crate::preprocess::{Preprocessor, PreprocessingSummary};
use crate::reporting::MomentsReport;
use crate::stats::compute_moments;
use crate::visualize::{
    CATEGORICAL_FILE, ChartArtifact, Figure, RELATIONAL_FILE, STATISTICAL_FILE, plot_categorical,
    plot_relational, plot_statistical,
};
use polars::prelude::DataFrame;
use tracing::info;

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The cleaned table.
    pub table: DataFrame,
    pub preprocessing: PreprocessingSummary,
    /// Relational, statistical and categorical chart, in render order.
    pub charts: Vec<ChartArtifact>,
    pub report: MomentsReport,
}

/// Runs the fixed analysis sequence described by an [`AnalysisConfig`].
///
/// Any stage failure aborts the run; there is no retry and no partial
/// result. Callers that need the preprocessing tables even when a later
/// stage fails use [`run_with`](Self::run_with).
///
/// # Example
///
/// ```rust,ignore
/// use housing_eda::{AnalysisConfig, AnalysisPipeline};
///
/// let outcome = AnalysisPipeline::new(AnalysisConfig::default())?.run()?;
/// println!("{}", outcome.report);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline; the configuration is validated first.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load the configured dataset and run every stage on it.
    pub fn run(&self) -> Result<AnalysisOutcome> {
        self.run_with(|_| Ok(()))
    }

    /// Like [`run`](Self::run), handing the preprocessing summary to
    /// `on_preprocessed` before any chart is drawn.
    ///
    /// An error from the callback aborts the run.
    pub fn run_with<F>(&self, on_preprocessed: F) -> Result<AnalysisOutcome>
    where
        F: FnMut(&PreprocessingSummary) -> Result<()>,
    {
        let df = load_dataset(&self.config.input_path).context("loading dataset")?;
        self.run_on_with(df, on_preprocessed)
    }

    /// Run every stage after loading on an already-loaded table.
    pub fn run_on(&self, df: DataFrame) -> Result<AnalysisOutcome> {
        self.run_on_with(df, |_| Ok(()))
    }

    /// [`run_on`](Self::run_on) with the preprocessing callback of
    /// [`run_with`](Self::run_with).
    pub fn run_on_with<F>(
        &self,
        mut df: DataFrame,
        mut on_preprocessed: F,
    ) -> Result<AnalysisOutcome>
    where
        F: FnMut(&PreprocessingSummary) -> Result<()>,
    {
        let config = &self.config;

        info!("Preprocessing {} rows", df.height());
        let preprocessing = Preprocessor::from_config(config)
            .run(&mut df)
            .context("preprocessing")?;
        on_preprocessed(&preprocessing)?;

        std::fs::create_dir_all(&config.output_dir)?;

        let relational = plot_relational(
            &df,
            &config.area_column,
            &config.price_column,
            &self.figure(RELATIONAL_FILE, config.relational_size, "Living Area vs. Sale Price"),
        )
        .context("relational plot")?;

        let statistical = plot_statistical(
            &df,
            &self.figure(STATISTICAL_FILE, config.statistical_size, "Correlation Heatmap"),
        )
        .context("statistical plot")?;

        let categorical = plot_categorical(
            &df,
            &config.category_column,
            &config.price_column,
            &self.figure(
                CATEGORICAL_FILE,
                config.categorical_size,
                "Average Sale Price per Neighborhood",
            ),
        )
        .context("categorical plot")?;

        let moments = compute_moments(&df, &config.target_column, config.skewness_estimator)
            .context("statistical analysis")?;
        let report = MomentsReport::new(&config.target_column, moments);
        info!(
            "Analysis of '{}' complete: {}, {}",
            report.column, report.skew, report.tails
        );

        Ok(AnalysisOutcome {
            table: df,
            preprocessing,
            charts: vec![relational, statistical, categorical],
            report,
        })
    }

    fn figure(&self, file: &str, size: ChartSize, title: &str) -> Figure {
        Figure::new(self.config.output_dir.join(file), size, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::SkewShape;
    use crate::visualize::ChartKind;
    use polars::prelude::*;

    fn scratch(test: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("housing-eda-pipeline-{}", std::process::id()))
            .join(test)
    }

    fn housing_frame() -> DataFrame {
        df![
            "Order" => [1i64, 2, 3, 4],
            "PID" => [526301100i64, 526350040, 526351010, 526353030],
            "Gr Liv Area" => [Some(1656i64), Some(896), None, Some(2110)],
            "Neighborhood" => ["NAmes", "NAmes", "Gilbert", "StoneBr"],
            "SalePrice" => [100000i64, 150000, 200000, 10000000],
        ]
        .unwrap()
    }

    #[test]
    fn test_run_on_produces_charts_and_report() {
        let config = AnalysisConfig::builder()
            .output_dir(scratch("full"))
            .build()
            .unwrap();
        let pipeline = AnalysisPipeline::new(config).unwrap();

        let outcome = pipeline.run_on(housing_frame()).unwrap();

        assert_eq!(outcome.table.shape(), (4, 3));
        let kinds: Vec<ChartKind> = outcome.charts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChartKind::Relational, ChartKind::Statistical, ChartKind::Categorical]
        );
        for chart in &outcome.charts {
            assert!(chart.path.exists(), "{}", chart.path.display());
        }
        assert!((outcome.report.moments.mean - 2_612_500.0).abs() < 1e-6);
        assert_eq!(outcome.report.skew, SkewShape::RightSkewed);
    }

    #[test]
    fn test_missing_category_column_aborts() {
        let config = AnalysisConfig::builder()
            .output_dir(scratch("missing"))
            .category_column("MS Zoning")
            .build()
            .unwrap();

        let err = AnalysisPipeline::new(config)
            .unwrap()
            .run_on(housing_frame())
            .unwrap_err();

        assert!(err.is_column_not_found());
        assert!(err.to_string().starts_with("categorical plot"));
    }

    #[test]
    fn test_summary_delivered_before_later_failure() {
        let config = AnalysisConfig::builder()
            .output_dir(scratch("summary_first"))
            .category_column("MS Zoning")
            .build()
            .unwrap();
        let mut seen = None;

        let err = AnalysisPipeline::new(config)
            .unwrap()
            .run_on_with(housing_frame(), |summary| {
                seen = Some(summary.description.clone());
                Ok(())
            })
            .unwrap_err();

        assert!(err.to_string().starts_with("categorical plot"));
        let description = seen.expect("summary reached the callback");
        assert_eq!(description.height(), 8);
        assert!(description.column("SalePrice").is_ok());
    }

    #[test]
    fn test_callback_error_stops_before_charts() {
        let out = scratch("callback_error");
        let _ = std::fs::remove_dir_all(&out);
        let config = AnalysisConfig::builder().output_dir(&out).build().unwrap();

        let err = AnalysisPipeline::new(config)
            .unwrap()
            .run_on_with(housing_frame(), |_| {
                Err(std::io::Error::other("stdout closed").into())
            })
            .unwrap_err();

        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(!out.join(RELATIONAL_FILE).exists());
    }

    #[test]
    fn test_missing_input_file() {
        let config = AnalysisConfig::builder()
            .input_path(scratch("absent").join("data.csv"))
            .build()
            .unwrap();

        let err = AnalysisPipeline::new(config).unwrap().run().unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
