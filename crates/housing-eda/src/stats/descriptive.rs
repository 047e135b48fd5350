//! Descriptive statistics over plain `f64` slices and the `describe` table.

use crate::error::Result;
use crate::utils::{numeric_column_names, numeric_values};
use polars::prelude::*;

/// Row labels of the descriptive-statistics table, in order.
pub const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Drop missing entries, keeping the order of the present values.
///
/// This is the only place missing values are removed before a statistic is
/// computed; every estimator below assumes its input is complete.
pub fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile with linear interpolation between the closest ranks.
///
/// `q` is clamped to `[0, 1]`. `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

/// Median of the values. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Summary of one numeric column, matching the rows of [`DESCRIBE_ROWS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarise the present values. Undefined statistics are `NaN`.
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let mut present = present_values(values);
        present.sort_by(f64::total_cmp);

        let at = |q: f64| {
            if present.is_empty() {
                f64::NAN
            } else {
                quantile_sorted(&present, q)
            }
        };

        Self {
            count: present.len(),
            mean: mean(&present).unwrap_or(f64::NAN),
            std: sample_std(&present).unwrap_or(f64::NAN),
            min: at(0.0),
            q1: at(0.25),
            median: at(0.5),
            q3: at(0.75),
            max: at(1.0),
        }
    }

    fn as_row_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
        ]
    }
}

/// Build the descriptive-statistics table for every numeric column.
///
/// The first column, `statistic`, holds the labels from [`DESCRIBE_ROWS`];
/// each numeric column of `df` contributes one `Float64` column.
pub fn describe(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::new();
    columns.push(Column::new("statistic".into(), DESCRIBE_ROWS.to_vec()));

    for name in numeric_column_names(df) {
        let summary = ColumnSummary::from_values(&numeric_values(df, &name)?);
        columns.push(Column::new(
            name.as_str().into(),
            summary.as_row_values().to_vec(),
        ));
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_present_values_skips_missing() {
        let values = [Some(1.0), None, Some(3.0), None];
        assert_eq!(present_values(&values), vec![1.0, 3.0]);
    }

    #[test]
    fn test_mean_and_std_closed_form() {
        // Mean = 3, variance = 10 / 4 = 2.5
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(close(mean(&values).unwrap(), 3.0));
        assert!(close(sample_std(&values).unwrap(), 2.5f64.sqrt()));
    }

    #[test]
    fn test_std_needs_two_values() {
        assert_eq!(sample_std(&[4.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.75), Some(3.25));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
    }

    #[test]
    fn test_column_summary_ignores_missing() {
        let summary = ColumnSummary::from_values(&[Some(10.0), None, Some(30.0), Some(20.0)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.max, 30.0);
        assert_eq!(summary.q1, 15.0);
        assert_eq!(summary.q3, 25.0);
    }

    #[test]
    fn test_column_summary_all_missing_is_nan() {
        let summary = ColumnSummary::from_values(&[None, None]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.median.is_nan());
    }

    #[test]
    fn test_describe_layout() {
        let df = df![
            "SalePrice" => [100.0, 200.0, 300.0],
            "Neighborhood" => ["A", "B", "A"],
            "Lot Area" => [Some(1i64), None, Some(3)],
        ]
        .unwrap();

        let table = describe(&df).unwrap();
        assert_eq!(table.height(), DESCRIBE_ROWS.len());
        let names: Vec<String> = table
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        pretty_assertions::assert_eq!(names, vec!["statistic", "SalePrice", "Lot Area"]);

        let lot_count = table
            .column("Lot Area")
            .unwrap()
            .get(0)
            .unwrap()
            .try_extract::<f64>()
            .unwrap();
        assert_eq!(lot_count, 2.0);

        let price_mean = table
            .column("SalePrice")
            .unwrap()
            .get(1)
            .unwrap()
            .try_extract::<f64>()
            .unwrap();
        assert_eq!(price_mean, 200.0);
    }
}
