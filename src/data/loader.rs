//! CSV Data Loader Module
//! Handles CSV file loading and column validation using Polars.

use crate::config::MISSING_TOKENS;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Dataset is empty")]
    Empty,
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),
}

/// Check whether a dtype is stored as an integer or float.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file using Polars.
    ///
    /// Missing-value tokens (`NA`, `NaN`, empty cells, ...) load as nulls and
    /// column types are inferred from every row, so a text value late in a
    /// column keeps the whole column as text. A missing file or a file
    /// without rows is an error.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        info!("Loading data from: {}", file_path.display());
        let null_values =
            NullValues::AllColumns(MISSING_TOKENS.iter().map(|t| (*t).into()).collect());
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_null_values(Some(null_values))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }
        info!("Initial shape: ({}, {})", df.height(), df.width());
        debug!("Columns: {:?}", df.get_column_names());

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::Empty)
    }

    /// Fail unless every required column is present (names compared trimmed).
    pub fn require_columns(&self, required: &[&str]) -> Result<(), LoaderError> {
        let columns = self.get_columns();
        for name in required {
            if !columns.iter().any(|c| c.trim() == *name) {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Take ownership of the loaded DataFrame.
    pub fn take_dataframe(&mut self) -> Result<DataFrame, LoaderError> {
        self.df.take().ok_or(LoaderError::Empty)
    }
}
