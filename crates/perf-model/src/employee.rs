//! Employee records as they flow through cleaning and scoring.

use serde::{Deserialize, Serialize};

/// Column holding the employee identifier.
pub const EMPLOYEE_ID_FIELD: &str = "employee_id";

/// Numeric performance columns summed into the composite score, in input order.
pub const SCORE_FIELDS: [&str; 5] = [
    "no_of_trainings",
    "previous_year_rating",
    "KPIs_met_more_than_80",
    "awards_won",
    "avg_training_score",
];

/// Every column a row must populate to take part in the analysis.
pub const REQUIRED_FIELDS: [&str; 6] = [
    EMPLOYEE_ID_FIELD,
    SCORE_FIELDS[0],
    SCORE_FIELDS[1],
    SCORE_FIELDS[2],
    SCORE_FIELDS[3],
    SCORE_FIELDS[4],
];

/// A cleaned employee row.
///
/// `values` is aligned with [`SCORE_FIELDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub values: [f64; SCORE_FIELDS.len()],
}

impl EmployeeRecord {
    pub fn new(employee_id: impl Into<String>, values: [f64; SCORE_FIELDS.len()]) -> Self {
        Self {
            employee_id: employee_id.into(),
            values,
        }
    }

    /// Value of a score field by column name.
    pub fn value(&self, field: &str) -> Option<f64> {
        SCORE_FIELDS
            .iter()
            .position(|name| *name == field)
            .map(|idx| self.values[idx])
    }

    /// Composite score: the sum of every score field.
    pub fn composite_score(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// An employee with their composite performance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEmployee {
    pub employee_id: String,
    pub score: f64,
}

impl From<&EmployeeRecord> for ScoredEmployee {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            score: record.composite_score(),
        }
    }
}
