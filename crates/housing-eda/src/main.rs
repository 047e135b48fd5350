//! CLI entry point for the housing analysis.
//!
//! With no arguments it reads `data.csv`, writes the three charts to the
//! working directory and prints the summaries to stdout.

use anyhow::Result;
use clap::Parser;
use housing_eda::{
    AnalysisConfig, AnalysisPipeline, AnalysisResult, PreprocessingSummary, ReportFormat,
    SkewnessEstimator, write_report,
};
use std::io::Write;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory statistics and charts for housing-price data",
    long_about = "Loads a housing dataset, fills missing numeric values with column medians,\n\
                  writes relational, categorical and statistical charts as PNG files and\n\
                  reports the moments of the target column.\n\n\
                  EXAMPLES:\n  \
                  # Defaults: data.csv in, charts in the working directory\n  \
                  housing-eda\n\n  \
                  # Different dataset and chart directory\n  \
                  housing-eda -i ames.csv -o charts/\n\n  \
                  # Moments as JSON\n  \
                  housing-eda --json | jq .skew"
)]
struct Args {
    /// Path to the CSV file to analyse
    #[arg(short, long, default_value = housing_eda::config::DEFAULT_INPUT)]
    input: String,

    /// Directory the chart images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// Column whose moments are reported
    #[arg(short, long, default_value = "SalePrice")]
    column: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the moments report as JSON and nothing else
    #[arg(long)]
    json: bool,

    /// Use the biased (population) skewness estimator
    #[arg(long)]
    population_skew: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// JSON output keeps stdout clean, so no subscriber is installed for it.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let estimator = if args.population_skew {
        SkewnessEstimator::Population
    } else {
        SkewnessEstimator::Adjusted
    };

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output_dir)
        .target_column(&args.column)
        .skewness_estimator(estimator)
        .build()?;
    debug!("Configuration: {:?}", config);

    let stdout = std::io::stdout();
    let json = args.json;

    // Tables print when preprocessing ends, before any chart is drawn
    let outcome = AnalysisPipeline::new(config)?.run_with(|summary| {
        if json {
            return Ok(());
        }
        print_preprocessing(&mut stdout.lock(), summary)
    })?;

    let format = if json { ReportFormat::Json } else { ReportFormat::Text };
    write_report(&mut stdout.lock(), &outcome.report, format)?;

    Ok(())
}

/// Print the descriptive statistics and the correlation preview.
///
/// This is the program's primary output, so it goes to stdout regardless of
/// the log level.
fn print_preprocessing<W: Write>(
    out: &mut W,
    summary: &PreprocessingSummary,
) -> AnalysisResult<()> {
    writeln!(out, "{}", summary.description)?;
    writeln!(out, "{}", summary.correlation_preview)?;
    out.flush()?;
    Ok(())
}
