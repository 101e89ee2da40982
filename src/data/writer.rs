//! Cleaned dataset export.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Write a frame as comma-separated CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;

    info!("Cleaned dataset saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_round_trips_header_and_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        let dates = Series::new("Date".into(), vec![Some(14645i32)])
            .cast(&DataType::Date)
            .unwrap();
        let mut df = DataFrame::new(vec![
            Column::new("Store".into(), vec![1i64]),
            dates.into(),
            Column::new("Weekly_Sales".into(), vec![10.5f64]),
        ])
        .unwrap();

        write_csv(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Store,Date,Weekly_Sales"));
        assert_eq!(lines.next(), Some("1,2010-02-05,10.5"));
    }

    #[test]
    fn test_write_csv_reports_bad_directory() {
        let mut df = DataFrame::new(vec![Column::new("a".into(), vec![1i64])]).unwrap();
        let err = write_csv(&mut df, Path::new("/no/such/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
