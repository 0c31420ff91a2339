//! Row cleaning and outlier capping.
//!
//! A row takes part in the analysis only if its id and every score field
//! are present and numeric. Each score field is then clipped from above at
//! a per-column quantile of the kept rows.

use tracing::{info, warn};

use perf_common::percentile;
use perf_model::{EmployeeRecord, SCORE_FIELDS};

use crate::csv_ingest::{EmployeeTable, RawCell};
use crate::error::{IngestError, Result};

/// Default upper quantile used to cap each score field.
pub const DEFAULT_CAP_QUANTILE: f64 = 0.99;

/// Options controlling [`clean_records`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleaningOptions {
    /// Upper quantile in `(0, 1]`; `None` disables capping.
    pub cap_quantile: Option<f64>,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            cap_quantile: Some(DEFAULT_CAP_QUANTILE),
        }
    }
}

/// Cap applied to one score field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCap {
    pub field: &'static str,
    pub cap: f64,
    /// Number of values lowered to `cap`.
    pub capped: usize,
}

/// Counts describing what cleaning did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningReport {
    pub input_rows: usize,
    /// Rows dropped for a blank id or score field.
    pub dropped_missing: usize,
    /// Rows dropped for a non-numeric score field.
    pub dropped_invalid: usize,
    pub caps: Vec<FieldCap>,
}

impl CleaningReport {
    pub fn kept_rows(&self) -> usize {
        self.input_rows - self.dropped_missing - self.dropped_invalid
    }
}

/// Cleaned records and the report describing how they were produced.
#[derive(Debug, Clone)]
pub struct CleanedRecords {
    pub records: Vec<EmployeeRecord>,
    pub report: CleaningReport,
}

/// Drops incomplete rows and caps each score field.
///
/// Rows are kept in file order. A row with both a blank and a non-numeric
/// field counts as missing.
///
/// # Errors
///
/// Returns [`IngestError::InvalidCapQuantile`] if the cap quantile is not in
/// `(0, 1]`.
pub fn clean_records(table: &EmployeeTable, options: &CleaningOptions) -> Result<CleanedRecords> {
    if let Some(q) = options.cap_quantile
        && !(q > 0.0 && q <= 1.0)
    {
        return Err(IngestError::InvalidCapQuantile { value: q });
    }

    let mut report = CleaningReport {
        input_rows: table.len(),
        ..CleaningReport::default()
    };
    let mut records = Vec::with_capacity(table.len());

    for row in &table.rows {
        let Some(employee_id) = row.employee_id.as_deref() else {
            report.dropped_missing += 1;
            continue;
        };
        if row.cells.iter().any(|cell| matches!(cell, RawCell::Missing)) {
            report.dropped_missing += 1;
            continue;
        }
        if let Some((field, RawCell::Invalid(text))) = SCORE_FIELDS
            .iter()
            .zip(&row.cells)
            .find(|(_, cell)| matches!(cell, RawCell::Invalid(_)))
        {
            warn!(
                line = row.line,
                employee_id,
                field,
                value = %text,
                "dropping row with non-numeric value"
            );
            report.dropped_invalid += 1;
            continue;
        }

        let mut values = [0.0; SCORE_FIELDS.len()];
        for (value, cell) in values.iter_mut().zip(&row.cells) {
            *value = cell.value().unwrap_or(f64::NAN);
        }
        records.push(EmployeeRecord::new(employee_id, values));
    }

    if report.dropped_missing > 0 {
        warn!(rows = report.dropped_missing, "dropped rows with missing values");
    }

    if let Some(q) = options.cap_quantile {
        report.caps = cap_fields(&mut records, q * 100.0);
    }

    info!(
        input_rows = report.input_rows,
        kept_rows = records.len(),
        dropped_missing = report.dropped_missing,
        dropped_invalid = report.dropped_invalid,
        "cleaned employee records"
    );

    Ok(CleanedRecords { records, report })
}

fn cap_fields(records: &mut [EmployeeRecord], q: f64) -> Vec<FieldCap> {
    let mut caps = Vec::with_capacity(SCORE_FIELDS.len());
    for (idx, field) in SCORE_FIELDS.iter().enumerate() {
        let column: Vec<f64> = records.iter().map(|r| r.values[idx]).collect();
        let Some(cap) = percentile(&column, q) else {
            continue;
        };
        let mut capped = 0;
        for record in records.iter_mut() {
            if record.values[idx] > cap {
                record.values[idx] = cap;
                capped += 1;
            }
        }
        caps.push(FieldCap {
            field: *field,
            cap,
            capped,
        });
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_ingest::RawEmployeeRow;
    use std::path::PathBuf;

    fn row(line: usize, id: &str, cells: [RawCell; 5]) -> RawEmployeeRow {
        RawEmployeeRow {
            line,
            employee_id: (!id.is_empty()).then(|| id.to_string()),
            cells,
        }
    }

    fn values(v: [f64; 5]) -> [RawCell; 5] {
        v.map(RawCell::Value)
    }

    #[test]
    fn rejects_out_of_range_quantile() {
        let table = EmployeeTable {
            path: PathBuf::from("t.csv"),
            rows: Vec::new(),
            ignored_columns: Vec::new(),
        };
        for q in [0.0, -0.5, 1.5, f64::NAN] {
            let options = CleaningOptions {
                cap_quantile: Some(q),
            };
            assert!(matches!(
                clean_records(&table, &options),
                Err(IngestError::InvalidCapQuantile { .. })
            ));
        }
    }

    #[test]
    fn blank_id_counts_as_missing() {
        let table = EmployeeTable {
            path: PathBuf::from("t.csv"),
            rows: vec![
                row(2, "", values([1.0; 5])),
                row(3, "7", values([1.0; 5])),
            ],
            ignored_columns: Vec::new(),
        };
        let cleaned = clean_records(&table, &CleaningOptions { cap_quantile: None })
            .expect("clean");
        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.report.dropped_missing, 1);
        assert_eq!(cleaned.report.kept_rows(), 1);
        assert!(cleaned.report.caps.is_empty());
    }
}
