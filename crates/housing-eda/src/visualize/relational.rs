//! Scatter plot of two numeric columns.

use super::{ChartArtifact, ChartKind, DrawResultExt, FONT_FAMILY, Figure, ensure_font, padded_range};
use crate::error::{AnalysisError, Result};
use crate::utils::numeric_values;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::info;

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
const POINT_ALPHA: f64 = 0.5;

/// Scatter `y_col` against `x_col`; rows missing either value are skipped.
pub fn plot_relational(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    figure: &Figure,
) -> Result<ChartArtifact> {
    let kind = ChartKind::Relational;
    let xs = numeric_values(df, x_col)?;
    let ys = numeric_values(df, y_col)?;

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(&ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if points.is_empty() {
        return Err(AnalysisError::NoValidValues(format!("{x_col} / {y_col}")));
    }

    let x_range = padded_range(points.iter().map(|p| p.0));
    let y_range = padded_range(points.iter().map(|p| p.1));

    ensure_font(kind)?;
    {
        let root =
            BitMapBackend::new(&figure.path, (figure.size.width, figure.size.height))
                .into_drawing_area();
        root.fill(&WHITE).drawing(kind)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, (FONT_FAMILY, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range, y_range)
            .drawing(kind)?;

        chart
            .configure_mesh()
            .x_desc(x_col)
            .y_desc(y_col)
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()
            .drawing(kind)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, POINT_COLOR.mix(POINT_ALPHA).filled())),
            )
            .drawing(kind)?;

        root.present().drawing(kind)?;
    }

    info!(
        "Saved {} ({} points) to {}",
        kind,
        points.len(),
        figure.path.display()
    );
    Ok(figure.artifact(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartSize;
    use crate::visualize::test_support::{is_png, scratch_dir};
    use polars::prelude::*;

    fn figure(name: &str) -> Figure {
        Figure::new(
            scratch_dir("relational").join(name),
            ChartSize::new(640, 480),
            "Living Area vs. Sale Price",
        )
    }

    #[test]
    fn test_plot_relational_writes_png() {
        let df = df![
            "Gr Liv Area" => [Some(1656.0), Some(896.0), None, Some(2110.0)],
            "SalePrice" => [Some(215000.0), Some(105000.0), Some(172000.0), None],
        ]
        .unwrap();
        let fig = figure("scatter.png");

        let artifact = plot_relational(&df, "Gr Liv Area", "SalePrice", &fig).unwrap();

        assert_eq!(artifact.kind, ChartKind::Relational);
        assert_eq!(artifact.path(), fig.path.as_path());
        assert!(is_png(&fig.path));
    }

    #[test]
    fn test_plot_relational_overwrites() {
        let df = df![
            "Gr Liv Area" => [1.0, 2.0, 3.0],
            "SalePrice" => [3.0, 1.0, 2.0],
        ]
        .unwrap();
        let fig = figure("rerun.png");

        plot_relational(&df, "Gr Liv Area", "SalePrice", &fig).unwrap();
        plot_relational(&df, "Gr Liv Area", "SalePrice", &fig).unwrap();
        assert!(is_png(&fig.path));
    }

    #[test]
    fn test_plot_relational_missing_column() {
        let df = df!["SalePrice" => [1.0, 2.0]].unwrap();
        let err = plot_relational(&df, "Gr Liv Area", "SalePrice", &figure("missing.png"))
            .unwrap_err();
        assert!(err.is_column_not_found());
    }

    #[test]
    fn test_plot_relational_no_complete_rows() {
        let df = df![
            "Gr Liv Area" => [Some(1.0), None],
            "SalePrice" => [None, Some(2.0)],
        ]
        .unwrap();
        let err = plot_relational(&df, "Gr Liv Area", "SalePrice", &figure("empty.png"))
            .unwrap_err();
        assert_eq!(err.error_code(), "NO_VALID_VALUES");
    }
}
