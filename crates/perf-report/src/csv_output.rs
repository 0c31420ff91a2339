//! Categorized employee CSV.

use std::path::{Path, PathBuf};

use perf_model::CategorizedEmployee;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

pub const CATEGORIZED_CSV_FILE: &str = "categorized_employees.csv";

#[derive(Serialize)]
struct CategorizedRow<'a> {
    employee_id: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Total Rating")]
    total_rating: f64,
}

/// Writes `categorized` to [`CATEGORIZED_CSV_FILE`] under `output_dir`, in
/// the given order.
///
/// Creates `output_dir` if needed and returns the written path.
pub fn write_categorized_csv(
    output_dir: &Path,
    categorized: &[CategorizedEmployee],
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(CATEGORIZED_CSV_FILE);
    let mut writer = csv::Writer::from_path(&output_path)?;
    if categorized.is_empty() {
        writer.write_record(["employee_id", "Category", "Total Rating"])?;
    }
    for employee in categorized {
        writer.serialize(CategorizedRow {
            employee_id: &employee.employee_id,
            category: employee.tier.as_str(),
            total_rating: employee.score,
        })?;
    }
    writer.flush()?;
    info!(
        path = %output_path.display(),
        rows = categorized.len(),
        "wrote categorized employees"
    );
    Ok(output_path)
}
