//! Employee data ingestion.
//!
//! Loading is split from cleaning so the raw table can be inspected (and
//! tested) before any row is dropped or value capped:
//!
//! - [`load_employee_table`] reads the CSV and checks the required columns.
//! - [`clean_records`] drops incomplete rows and caps outliers.
//! - [`score_employees`] sums the score fields into a composite score.

pub mod cleaning;
pub mod csv_ingest;
pub mod error;
pub mod scoring;

pub use cleaning::{
    CleanedRecords, CleaningOptions, CleaningReport, DEFAULT_CAP_QUANTILE, FieldCap, clean_records,
};
pub use csv_ingest::{EmployeeTable, RawCell, RawEmployeeRow, load_employee_table};
pub use error::{IngestError, Result};
pub use scoring::{score_employees, score_sample};
