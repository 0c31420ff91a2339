//! Tests for perf-model types.

use perf_model::{
    EmployeeRecord, NormalityResult, PerformanceTier, REQUIRED_FIELDS, SCORE_FIELDS,
    ScoredEmployee, StrategyFailure, TierThresholds,
};

fn thresholds() -> TierThresholds {
    TierThresholds {
        poor: 10.0,
        average: 20.0,
        good: 30.0,
        best: 40.0,
    }
}

#[test]
fn required_fields_lead_with_employee_id() {
    assert_eq!(REQUIRED_FIELDS[0], "employee_id");
    assert_eq!(&REQUIRED_FIELDS[1..], &SCORE_FIELDS[..]);
}

#[test]
fn composite_score_sums_all_fields() {
    let record = EmployeeRecord::new("E1", [2.0, 3.0, 1.0, 0.0, 60.0]);
    assert_eq!(record.composite_score(), 66.0);
    assert_eq!(record.value("avg_training_score"), Some(60.0));
    assert_eq!(record.value("department"), None);

    let scored = ScoredEmployee::from(&record);
    assert_eq!(scored.employee_id, "E1");
    assert_eq!(scored.score, 66.0);
}

#[test]
fn classify_uses_inclusive_lower_bounds() {
    let thresholds = thresholds();
    assert_eq!(thresholds.classify(40.0), PerformanceTier::Best);
    assert_eq!(thresholds.classify(39.9), PerformanceTier::Good);
    assert_eq!(thresholds.classify(30.0), PerformanceTier::Good);
    assert_eq!(thresholds.classify(20.0), PerformanceTier::Average);
    assert_eq!(thresholds.classify(19.99), PerformanceTier::Poor);
    // Scores below the Poor threshold are still Poor.
    assert_eq!(thresholds.classify(1.0), PerformanceTier::Poor);
}

#[test]
fn thresholds_iterate_lowest_first() {
    let pairs: Vec<_> = thresholds().iter().collect();
    assert_eq!(
        pairs,
        vec![
            (PerformanceTier::Poor, 10.0),
            (PerformanceTier::Average, 20.0),
            (PerformanceTier::Good, 30.0),
            (PerformanceTier::Best, 40.0),
        ]
    );
}

#[test]
fn tier_parses_case_insensitively() {
    assert_eq!("best".parse::<PerformanceTier>(), Ok(PerformanceTier::Best));
    assert_eq!(" Average ".parse::<PerformanceTier>(), Ok(PerformanceTier::Average));
    assert!("excellent".parse::<PerformanceTier>().is_err());
    assert_eq!(PerformanceTier::Good.to_string(), "Good");
}

#[test]
fn strategy_failure_serializes_with_kind_tag() {
    let failure = StrategyFailure::InsufficientData { finite: 2 };
    let json = serde_json::to_value(&failure).expect("serialize failure");
    assert_eq!(json["kind"], "insufficient_data");
    assert_eq!(json["finite"], 2);
    assert_eq!(
        failure.to_string(),
        "insufficient data: 2 finite value(s), at least 3 required"
    );
}

#[test]
fn normality_result_alpha_check_is_strict() {
    let result = NormalityResult {
        strategy: "Original".to_string(),
        statistic: 0.97,
        p_value: 0.05,
        tested: 40,
        excluded: 0,
    };
    assert!(!result.is_normal_at(0.05));
    assert!(result.is_normal_at(0.01));
}
