//! Composite performance scoring.

use tracing::debug;

use perf_model::{EmployeeRecord, ScoredEmployee};

/// Scores each record as the sum of its score fields, keeping record order.
pub fn score_employees(records: &[EmployeeRecord]) -> Vec<ScoredEmployee> {
    let scored: Vec<ScoredEmployee> = records.iter().map(ScoredEmployee::from).collect();
    debug!(employees = scored.len(), "computed composite scores");
    scored
}

/// The composite scores as a plain sample.
pub fn score_sample(scored: &[ScoredEmployee]) -> Vec<f64> {
    scored.iter().map(|employee| employee.score).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_sum_fields_in_order() {
        let records = vec![
            EmployeeRecord::new("a", [1.0, 3.0, 1.0, 0.0, 60.0]),
            EmployeeRecord::new("b", [2.0, 5.0, 0.0, 1.0, 80.5]),
        ];
        let scored = score_employees(&records);
        assert_eq!(scored[0].employee_id, "a");
        assert_eq!(score_sample(&scored), vec![65.0, 88.5]);
    }
}
