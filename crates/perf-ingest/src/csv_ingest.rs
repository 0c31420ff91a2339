//! Employee CSV loading.
//!
//! Every column is read as a string so that an unparsable value in one row
//! does not change the type of its whole column; numeric coercion happens per
//! cell and is recorded in [`RawCell`].

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info};

use perf_common::{any_to_f64, any_to_string};
use perf_model::{EMPLOYEE_ID_FIELD, REQUIRED_FIELDS, SCORE_FIELDS};

use crate::error::{IngestError, Result};

/// One score cell after numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawCell {
    /// Empty or null in the file.
    #[default]
    Missing,
    /// Present but not a number; holds the original text.
    Invalid(String),
    Value(f64),
}

impl RawCell {
    fn from_any(value: AnyValue<'_>) -> Self {
        let text = any_to_string(value.clone());
        if text.is_empty() {
            return Self::Missing;
        }
        match any_to_f64(value) {
            Some(v) => Self::Value(v),
            None => Self::Invalid(text),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// A data row before cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEmployeeRow {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    /// `None` when the id cell is blank.
    pub employee_id: Option<String>,
    /// Cells aligned with [`SCORE_FIELDS`].
    pub cells: [RawCell; SCORE_FIELDS.len()],
}

/// The required columns of an employee CSV, row by row.
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    pub path: PathBuf,
    pub rows: Vec<RawEmployeeRow>,
    /// Columns present in the file that the analysis does not use.
    pub ignored_columns: Vec<String>,
}

impl EmployeeTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads an employee CSV.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] if the path does not exist
/// - [`IngestError::EmptyCsv`] if the file has no bytes or no data rows
/// - [`IngestError::CsvParse`] if Polars cannot parse the file
/// - [`IngestError::MissingColumns`] if a required column is absent
pub fn load_employee_table(path: &Path) -> Result<EmployeeTable> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().trim().to_string())
        .collect();
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !columns.iter().any(|c| c == *field))
        .map(|field| (*field).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            columns: missing,
            path: path.to_path_buf(),
        });
    }
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let ignored_columns: Vec<String> = columns
        .iter()
        .filter(|c| !REQUIRED_FIELDS.contains(&c.as_str()))
        .cloned()
        .collect();
    if !ignored_columns.is_empty() {
        debug!(columns = ?ignored_columns, "ignoring columns not used by the analysis");
    }

    let id_column = column_by_name(&df, &columns, EMPLOYEE_ID_FIELD)?;
    let score_columns = SCORE_FIELDS
        .iter()
        .map(|field| column_by_name(&df, &columns, field))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let id = any_to_string(id_column.get(idx)?);
        let mut cells: [RawCell; SCORE_FIELDS.len()] = Default::default();
        for (cell, column) in cells.iter_mut().zip(&score_columns) {
            *cell = RawCell::from_any(column.get(idx)?);
        }
        rows.push(RawEmployeeRow {
            line: idx + 2,
            employee_id: (!id.is_empty()).then_some(id),
            cells,
        });
    }

    info!(
        path = %path.display(),
        rows = rows.len(),
        columns = columns.len(),
        "loaded employee table"
    );

    Ok(EmployeeTable {
        path: path.to_path_buf(),
        rows,
        ignored_columns,
    })
}

/// Looks a column up by its trimmed header name.
fn column_by_name<'a>(df: &'a DataFrame, trimmed: &[String], name: &str) -> Result<&'a Column> {
    let idx = trimmed
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| IngestError::DataFrame {
            message: format!("column '{name}' not found"),
        })?;
    df.select_at_idx(idx).ok_or_else(|| IngestError::DataFrame {
        message: format!("column index {idx} out of bounds"),
    })
}
