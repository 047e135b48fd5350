//! CSV loading into a polars [`DataFrame`].

use crate::error::{AnalysisError, Result, ResultExt};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Cell contents read as missing values.
pub const MISSING_MARKERS: [&str; 10] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A",
];

/// Load a delimited table with a header row.
///
/// Column types are inferred from the whole file: numeric columns become
/// integer or float columns, anything else is read as strings.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalysisError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());

    let null_values = NullValues::AllColumns(MISSING_MARKERS.iter().map(|m| (*m).into()).collect());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("opening {}", path.display()))?
        .finish()
        .context(format!("parsing {}", path.display()))?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    debug!("Columns: {:?}", df.get_column_names());

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("housing-eda-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_types_and_missing_markers() {
        let path = write_temp_csv(
            "types.csv",
            "Order,Neighborhood,Lot Frontage,SalePrice\n\
             1,NAmes,80,215000\n\
             2,Gilbert,NA,105000\n\
             3,\"Old Town\",,172000\n",
        );

        let df = load_dataset(&path).unwrap();
        assert_eq!(df.shape(), (3, 4));
        assert!(crate::utils::is_numeric_dtype(df.column("SalePrice").unwrap().dtype()));
        assert!(crate::utils::is_numeric_dtype(df.column("Lot Frontage").unwrap().dtype()));
        assert_eq!(df.column("Neighborhood").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Lot Frontage").unwrap().null_count(), 2);
    }

    #[test]
    fn test_late_float_promotes_column() {
        let path = write_temp_csv("late_float.csv", "x\n1\n2\n3\n4.5\n");
        let df = load_dataset(&path).unwrap();
        assert_eq!(df.column("x").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset("does/not/exist.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
