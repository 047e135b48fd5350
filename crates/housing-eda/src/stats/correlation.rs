//! Pearson correlation matrix over the numeric columns of a table.

use crate::error::Result;
use crate::utils::{numeric_column_names, numeric_values};
use polars::prelude::*;

/// Square, symmetric matrix of Pearson coefficients.
///
/// Undefined pairs (fewer than two complete rows, or zero variance in either
/// column) hold `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns in `df`.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let columns = numeric_column_names(df);
        let data = columns
            .iter()
            .map(|name| numeric_values(df, name))
            .collect::<Result<Vec<_>>>()?;

        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&data[i], &data[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at row `i`, column `j`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Coefficient for a pair of named columns, if both are present.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// The first `rows` rows as a table with a leading `column` label column.
    pub fn head(&self, rows: usize) -> Result<DataFrame> {
        let rows = rows.min(self.len());
        let mut frame = Vec::with_capacity(self.len() + 1);
        frame.push(Column::new(
            "column".into(),
            self.columns[..rows].to_vec(),
        ));
        for (j, name) in self.columns.iter().enumerate() {
            let col: Vec<f64> = (0..rows).map(|i| self.values[i][j]).collect();
            frame.push(Column::new(name.as_str().into(), col));
        }
        Ok(DataFrame::new(frame)?)
    }

    /// The whole matrix as a table.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        self.head(self.len())
    }
}

/// Pearson correlation over the rows where both values are present.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_linear_correlation() {
        let df = df![
            "Gr Liv Area" => [1000.0, 1500.0, 2000.0, 2500.0],
            "SalePrice" => [100000.0, 150000.0, 200000.0, 250000.0],
        ]
        .unwrap();
        let corr = CorrelationMatrix::from_dataframe(&df).unwrap();
        let r = corr.get("Gr Liv Area", "SalePrice").unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        assert!((corr.value(1, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_correlation_and_diagonal() {
        let df = df![
            "a" => [1.0, 2.0, 3.0],
            "b" => [3.0, 2.0, 1.0],
        ]
        .unwrap();
        let corr = CorrelationMatrix::from_dataframe(&df).unwrap();
        assert!((corr.get("a", "b").unwrap() + 1.0).abs() < 1e-12);
        assert!((corr.value(0, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_numeric_columns_included() {
        let df = df![
            "Neighborhood" => ["A", "B", "C"],
            "SalePrice" => [1i64, 2, 3],
        ]
        .unwrap();
        let corr = CorrelationMatrix::from_dataframe(&df).unwrap();
        assert_eq!(corr.columns(), &["SalePrice".to_string()]);
    }

    #[test]
    fn test_pairwise_complete_observations() {
        let x = [Some(1.0), None, Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(100.0), Some(4.0), Some(6.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let x = [Some(1.0), Some(1.0), Some(1.0)];
        let y = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(pearson(&x, &y).is_nan());
        assert!(pearson(&[Some(1.0)], &[Some(2.0)]).is_nan());
    }

    #[test]
    fn test_head_shape() {
        let df = df![
            "a" => [1.0, 2.0, 3.0],
            "b" => [2.0, 1.0, 4.0],
            "c" => [5.0, 6.0, 9.0],
        ]
        .unwrap();
        let corr = CorrelationMatrix::from_dataframe(&df).unwrap();

        let head = corr.head(2).unwrap();
        assert_eq!(head.shape(), (2, 4));
        assert_eq!(corr.head(10).unwrap().height(), 3);
    }
}
