//! Correlation heatmap with a colour bar.

use super::colormap::diverging_color;
use super::{
    ChartArtifact, ChartKind, DrawResultExt, FONT_FAMILY, Figure, LABEL_GAP, draw_rotated_labels,
    ensure_font,
};
use crate::error::{AnalysisError, Result};
use crate::stats::CorrelationMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use std::ops::Range;
use tracing::info;

const LEGEND_WIDTH: i32 = 130;
const LEGEND_STEPS: usize = 100;

/// Correlation heatmap over every numeric column of `df`.
pub fn plot_statistical(df: &DataFrame, figure: &Figure) -> Result<ChartArtifact> {
    let corr = CorrelationMatrix::from_dataframe(df)?;
    plot_correlation_heatmap(&corr, figure)
}

/// Draw a precomputed correlation matrix, first column at the top-left.
pub fn plot_correlation_heatmap(
    corr: &CorrelationMatrix,
    figure: &Figure,
) -> Result<ChartArtifact> {
    let kind = ChartKind::Statistical;
    if corr.is_empty() {
        return Err(AnalysisError::NoValidValues(
            "no numeric columns to correlate".to_string(),
        ));
    }

    ensure_font(kind)?;
    {
        let canvas = BitMapBackend::new(&figure.path, (figure.size.width, figure.size.height))
            .into_drawing_area();
        draw_heatmap(&canvas, corr, &figure.title)?;
        canvas.present().drawing(kind)?;
    }

    let n = corr.len();
    info!(
        "Saved {} ({}x{} matrix) to {}",
        kind,
        n,
        n,
        figure.path.display()
    );
    Ok(figure.artifact(kind))
}

/// Draws the grid, its labels and the legend; returns the grid's pixel extent.
///
/// Cell `(row, column)` occupies `[column, column + 1)` horizontally and
/// `[n - 1 - row, n - row)` vertically, so there are exactly `n` slots per axis.
fn draw_heatmap<DB: DrawingBackend>(
    canvas: &DrawingArea<DB, Shift>,
    corr: &CorrelationMatrix,
    title: &str,
) -> Result<(Range<i32>, Range<i32>)> {
    let kind = ChartKind::Statistical;
    let n = corr.len();
    let names = corr.columns();
    let extent = n as f64;
    // Small enough to fit ~40 rows of labels on the default canvas
    let label_size: u32 = if n > 30 { 9 } else { 12 };

    canvas.fill(&WHITE).drawing(kind)?;
    let body = canvas.titled(title, (FONT_FAMILY, 24)).drawing(kind)?;
    let (width, _) = body.dim_in_pixel();
    let (matrix_area, legend_area) = body.split_horizontally(width as i32 - LEGEND_WIDTH);

    let mut chart = ChartBuilder::on(&matrix_area)
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(140)
        .build_cartesian_2d(0.0..extent, 0.0..extent)
        .drawing(kind)?;

    chart
        .draw_series((0..n).flat_map(|row| {
            (0..n).map(move |column| {
                // Row 0 drawn at the top
                let y = (n - 1 - row) as f64;
                let x = column as f64;
                Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    diverging_color(corr.value(row, column)).filled(),
                )
            })
        }))
        .drawing(kind)?;

    let column_anchors: Vec<(&str, (i32, i32))> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), chart.backend_coord(&(i as f64 + 0.5, 0.0))))
        .collect();
    draw_rotated_labels(canvas, column_anchors, label_size, kind)?;

    let row_style = TextStyle::from((FONT_FAMILY, label_size).into_font())
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (row, name) in names.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(0.0, extent - row as f64 - 0.5));
        canvas
            .draw_text(name, &row_style, (x - LABEL_GAP, y))
            .drawing(kind)?;
    }

    draw_legend(&legend_area, kind)?;
    Ok(chart.plotting_area().get_pixel_range())
}

/// Vertical colour bar from -1 to 1.
fn draw_legend<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, kind: ChartKind) -> Result<()> {
    let mut legend = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(150)
        .margin_right(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)
        .drawing(kind)?;

    legend
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .label_style((FONT_FAMILY, 12))
        .draw()
        .drawing(kind)?;

    let step = 2.0 / LEGEND_STEPS as f64;
    legend
        .draw_series((0..LEGEND_STEPS).map(|i| {
            let lo = -1.0 + i as f64 * step;
            Rectangle::new(
                [(0.0, lo), (1.0, lo + step)],
                diverging_color(lo + step / 2.0).filled(),
            )
        }))
        .drawing(kind)?;

    Ok(())
}
