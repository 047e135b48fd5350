//! Chart rendering.
//!
//! Every chart is drawn onto an explicit [`Figure`]: the caller chooses the
//! output path, pixel size and title, and the rendering call creates the
//! bitmap surface, draws, writes the PNG and releases the surface before it
//! returns. Nothing is kept between calls, so the three charts can be drawn
//! in any order and re-running one simply overwrites its file.
//!
//! - [`plot_relational`]: scatter of two numeric columns
//! - [`plot_categorical`]: mean of a numeric column per category
//! - [`plot_statistical`]: correlation heatmap of all numeric columns

mod categorical;
mod colormap;
mod relational;
mod statistical;

pub use categorical::{CategoryMean, category_means, plot_categorical};
pub use colormap::diverging_color;
pub use relational::plot_relational;
pub use statistical::{plot_correlation_heatmap, plot_statistical};

use crate::config::ChartSize;
use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// File written by [`plot_relational`] in the pipeline.
pub const RELATIONAL_FILE: &str = "relational_plot.png";
/// File written by [`plot_categorical`] in the pipeline.
pub const CATEGORICAL_FILE: &str = "categorical_plot.png";
/// File written by [`plot_statistical`] in the pipeline.
pub const STATISTICAL_FILE: &str = "statistical_plot.png";

/// Font family every chart draws its text with.
pub(crate) const FONT_FAMILY: &str = "sans-serif";

static FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT_REGISTERED: Lazy<std::result::Result<(), String>> = Lazy::new(|| {
    // InvalidFont carries no detail to report
    register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
        .map_err(|_| "invalid font data".to_string())
});

/// Register the embedded font once per process.
pub(crate) fn ensure_font(kind: ChartKind) -> Result<()> {
    (*FONT_REGISTERED)
        .clone()
        .map_err(|reason| AnalysisError::RenderFailed {
            chart: kind.to_string(),
            reason: format!("font registration failed: {reason}"),
        })
}

/// Gap in pixels between an axis and the first character of its rotated labels.
pub(crate) const LABEL_GAP: i32 = 6;

/// Text turned 90° clockwise, anchored at the middle of its first character.
pub(crate) fn rotated_label_style(size: u32) -> TextStyle<'static> {
    TextStyle::from((FONT_FAMILY, size).into_font().transform(FontTransform::Rotate90))
        .pos(Pos::new(HPos::Left, VPos::Center))
}

/// Draw each label reading downward from just below its anchor on the axis.
///
/// Anchors are backend pixel coordinates, so `canvas` must be an area whose
/// origin is the backend origin.
pub(crate) fn draw_rotated_labels<'a, DB: DrawingBackend>(
    canvas: &DrawingArea<DB, Shift>,
    labels: impl IntoIterator<Item = (&'a str, (i32, i32))>,
    size: u32,
    kind: ChartKind,
) -> Result<()> {
    let style = rotated_label_style(size);
    for (text, (x, y)) in labels {
        canvas.draw_text(text, &style, (x, y + LABEL_GAP)).drawing(kind)?;
    }
    Ok(())
}

/// The three charts the pipeline draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Relational,
    Categorical,
    Statistical,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Relational => "relational plot",
            Self::Categorical => "categorical plot",
            Self::Statistical => "statistical plot",
        };
        f.write_str(name)
    }
}

/// Where and how large a chart is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub path: PathBuf,
    pub size: ChartSize,
    pub title: String,
}

impl Figure {
    pub fn new(path: impl Into<PathBuf>, size: ChartSize, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size,
            title: title.into(),
        }
    }

    fn artifact(&self, kind: ChartKind) -> ChartArtifact {
        ChartArtifact {
            kind,
            path: self.path.clone(),
            width: self.size.width,
            height: self.size.height,
        }
    }
}

/// A chart that has been written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ChartArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Maps plotters drawing errors onto [`AnalysisError::RenderFailed`].
pub(crate) trait DrawResultExt<T> {
    fn drawing(self, kind: ChartKind) -> Result<T>;
}

impl<T, E: fmt::Display> DrawResultExt<T> for std::result::Result<T, E> {
    fn drawing(self, kind: ChartKind) -> Result<T> {
        self.map_err(|e| AnalysisError::RenderFailed {
            chart: kind.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Axis range covering `values` with 5% padding on both ends.
pub(crate) fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = if max > min { max - min } else { min.abs().max(1.0) };
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range([0.0, 100.0].into_iter());
        assert_eq!(range, -5.0..105.0);
    }

    #[test]
    fn test_padded_range_single_value() {
        let range = padded_range([10.0].into_iter());
        assert!(range.start < 10.0 && range.end > 10.0);
    }

    #[test]
    fn test_padded_range_empty() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_font_registers() {
        assert!(ensure_font(ChartKind::Relational).is_ok());
        // Second call reuses the first registration
        assert!(ensure_font(ChartKind::Statistical).is_ok());
    }

    #[test]
    fn test_chart_kind_display() {
        assert_eq!(ChartKind::Categorical.to_string(), "categorical plot");
    }
}
