//! Error types for employee data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or cleaning employee data.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file metadata.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file is empty or has no data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Required columns are absent from the header.
    #[error("required column(s) {} not found in {path}", .columns.join(", "))]
    MissingColumns { columns: Vec<String>, path: PathBuf },

    /// Cap quantile outside `(0, 1]`.
    #[error("cap quantile must be in (0, 1], got {value}")]
    InvalidCapQuantile { value: f64 },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/employees.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/employees.csv");

        let err = IngestError::MissingColumns {
            columns: vec!["awards_won".to_string(), "employee_id".to_string()],
            path: PathBuf::from("hr.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column(s) awards_won, employee_id not found in hr.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
