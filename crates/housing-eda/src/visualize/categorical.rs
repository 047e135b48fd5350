//! Bar chart of a numeric column's mean per category.
//!
//! Each bar carries a whisker spanning the normal-approximation 95%
//! confidence interval of its mean, when the category has at least two
//! values.

use super::{
    ChartArtifact, ChartKind, DrawResultExt, FONT_FAMILY, Figure, draw_rotated_labels, ensure_font,
};
use crate::error::{AnalysisError, Result};
use crate::utils::{is_numeric_dtype, require_column};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::{DataFrame, DataType, IntoLazy, col};
use serde::Serialize;
use tracing::{debug, info};

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const WHISKER_COLOR: RGBColor = RGBColor(60, 60, 60);
const LABEL_SIZE: u32 = 12;

/// z value of the two-sided 95% normal interval.
const Z_95: f64 = 1.959_963_984_540_054;

const MEAN_ALIAS: &str = "__mean";
const STD_ALIAS: &str = "__std";
const COUNT_ALIAS: &str = "__count";

/// Mean of a numeric column within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean: f64,
    /// Sample standard deviation, `None` with fewer than two values.
    pub std_dev: Option<f64>,
    /// Number of non-missing values behind the mean.
    pub count: usize,
}

impl CategoryMean {
    /// Half-width of the 95% confidence interval of the mean.
    pub fn confidence_half_width(&self) -> Option<f64> {
        let sd = self.std_dev.filter(|sd| sd.is_finite())?;
        (self.count >= 2).then(|| Z_95 * sd / (self.count as f64).sqrt())
    }

    fn extent(&self) -> (f64, f64) {
        let half = self.confidence_half_width().unwrap_or(0.0);
        (self.mean - half, self.mean + half)
    }
}

/// Mean of `value_col` per distinct `category_col` value.
///
/// Categories keep the order of their first appearance; rows with a missing
/// category are excluded, and missing values do not count toward a mean.
/// Categories whose values are all missing are left out.
pub fn category_means(
    df: &DataFrame,
    category_col: &str,
    value_col: &str,
) -> Result<Vec<CategoryMean>> {
    require_column(df, category_col)?;
    let value = require_column(df, value_col)?;
    if !is_numeric_dtype(value.dtype()) {
        return Err(AnalysisError::NotNumeric {
            column: value_col.to_string(),
            dtype: format!("{}", value.dtype()),
        });
    }

    let grouped = df
        .clone()
        .lazy()
        .select([
            col(category_col).cast(DataType::String),
            col(value_col).cast(DataType::Float64),
        ])
        .filter(col(category_col).is_not_null())
        .group_by_stable([col(category_col)])
        .agg([
            col(value_col).mean().alias(MEAN_ALIAS),
            col(value_col).std(1).alias(STD_ALIAS),
            col(value_col).count().cast(DataType::Float64).alias(COUNT_ALIAS),
        ])
        .collect()?;

    let names = grouped.column(category_col)?.as_materialized_series().str()?;
    let means = grouped.column(MEAN_ALIAS)?.as_materialized_series().f64()?;
    let stds = grouped.column(STD_ALIAS)?.as_materialized_series().f64()?;
    let counts = grouped.column(COUNT_ALIAS)?.as_materialized_series().f64()?;

    let stats: Vec<CategoryMean> = names
        .into_iter()
        .zip(means)
        .zip(stds.into_iter().zip(counts))
        .filter_map(|((name, mean), (std_dev, count))| {
            Some(CategoryMean {
                category: name?.to_string(),
                mean: mean?,
                std_dev: std_dev.filter(|sd| !sd.is_nan()),
                count: count.unwrap_or(0.0) as usize,
            })
        })
        .collect();

    debug!("{} categories in '{}'", stats.len(), category_col);
    Ok(stats)
}

/// Bar chart of the mean of `value_col` per `category_col`, labels rotated 90°.
pub fn plot_categorical(
    df: &DataFrame,
    category_col: &str,
    value_col: &str,
    figure: &Figure,
) -> Result<ChartArtifact> {
    let kind = ChartKind::Categorical;
    let means = category_means(df, category_col, value_col)?;
    if means.is_empty() {
        return Err(AnalysisError::NoValidValues(category_col.to_string()));
    }

    ensure_font(kind)?;
    {
        let root = BitMapBackend::new(&figure.path, (figure.size.width, figure.size.height))
            .into_drawing_area();
        draw_bars(&root, &means, category_col, value_col, &figure.title)?;
        root.present().drawing(kind)?;
    }

    info!("Saved {} ({} bars) to {}", kind, means.len(), figure.path.display());
    Ok(figure.artifact(kind))
}

/// One slot of width 1 per category on `0..n`, bar centred in its slot.
fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    means: &[CategoryMean],
    category_col: &str,
    value_col: &str,
    title: &str,
) -> Result<()> {
    let kind = ChartKind::Categorical;
    let n = means.len();
    let (low, high) = means.iter().map(CategoryMean::extent).fold(
        (0.0_f64, 0.0_f64),
        |(lo, hi), (a, b)| (lo.min(a), hi.max(b)),
    );
    let y_range = (low * 1.1)..(if high > 0.0 { high * 1.1 } else { 1.0 });
    let y_floor = y_range.start;

    root.fill(&WHITE).drawing(kind)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT_FAMILY, 24))
        .margin(20)
        .x_label_area_size(150)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..n as f64, y_range)
        .drawing(kind)?;

    // Category names are drawn separately below the axis
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc(category_col)
        .y_desc(value_col)
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()
        .drawing(kind)?;

    chart
        .draw_series(means.iter().enumerate().map(|(i, stat)| {
            let x = i as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.9, stat.mean)], BAR_COLOR.filled())
        }))
        .drawing(kind)?;

    chart
        .draw_series(means.iter().enumerate().filter_map(|(i, stat)| {
            let half = stat.confidence_half_width()?;
            Some(ErrorBar::new_vertical(
                i as f64 + 0.5,
                stat.mean - half,
                stat.mean,
                stat.mean + half,
                WHISKER_COLOR.stroke_width(2),
                10,
            ))
        }))
        .drawing(kind)?;

    let anchors: Vec<(&str, (i32, i32))> = means
        .iter()
        .enumerate()
        .map(|(i, stat)| {
            let anchor = chart.backend_coord(&(i as f64 + 0.5, y_floor));
            (stat.category.as_str(), anchor)
        })
        .collect();
    draw_rotated_labels(root, anchors, LABEL_SIZE, kind)
}
