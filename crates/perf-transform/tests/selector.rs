//! Evaluation and selection scenarios for the normality selector.

use perf_model::{SelectionError, StrategyFailure};
use perf_transform::{
    Evaluation, InverseTransformation, NormalitySelector, OriginalTransformation, TransformError,
    TransformationCatalog, TransformationStrategy, default_catalog, select_best,
    select_best_index,
};

/// Identity under another name, to produce exact p-value ties.
struct Duplicate;

impl TransformationStrategy for Duplicate {
    fn name(&self) -> &'static str {
        "Duplicate"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.to_vec())
    }
}

/// Always fails, to exercise per-strategy failure handling.
struct Broken;

impl TransformationStrategy for Broken {
    fn name(&self) -> &'static str {
        "Broken"
    }

    fn apply(&self, _sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Err(TransformError::DegenerateInput("always broken".to_string()))
    }
}

/// Lower-case twin of [`Mirror`] that cannot be applied.
struct BrokenMirror;

impl TransformationStrategy for BrokenMirror {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn apply(&self, _sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Err(TransformError::DegenerateInput("broken twin".to_string()))
    }
}

/// Identity named like [`BrokenMirror`] up to case.
struct Mirror;

impl TransformationStrategy for Mirror {
    fn name(&self) -> &'static str {
        "Mirror"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.to_vec())
    }
}

fn strategy_names(evaluation: &Evaluation) -> Vec<&str> {
    evaluation
        .entries()
        .iter()
        .map(|entry| entry.strategy.as_str())
        .collect()
}

#[test]
fn evaluate_returns_one_entry_per_strategy_in_order() {
    let selector = NormalitySelector::new(default_catalog());
    let sample: Vec<f64> = (1..=10).map(f64::from).collect();
    let evaluation = selector.evaluate(&sample);
    assert_eq!(
        strategy_names(&evaluation),
        vec!["Original", "Log", "Square Root", "Box-Cox", "Inverse"]
    );
    assert_eq!(evaluation.successes().count(), 5);
}

#[test]
fn near_uniform_sample_selects_a_catalog_strategy() {
    let selector = NormalitySelector::new(default_catalog());
    let sample: Vec<f64> = (1..=10).map(f64::from).collect();
    let evaluation = selector.evaluate(&sample);

    let original = evaluation
        .get("Original")
        .and_then(|outcome| outcome.as_ref().ok())
        .expect("original evaluated");
    assert!(original.p_value > 0.0 && original.p_value <= 1.0);

    let winner = select_best(&evaluation).expect("winner");
    assert!(default_catalog().names().any(|name| name == winner));

    let best_p = evaluation
        .get(winner)
        .and_then(|outcome| outcome.as_ref().ok())
        .map(|result| result.p_value)
        .expect("winner result");
    assert!(evaluation.successes().all(|result| result.p_value <= best_p));
}

#[test]
fn select_best_is_deterministic() {
    let selector = NormalitySelector::new(default_catalog());
    let sample = [12.0, 15.0, 9.0, 30.0, 22.0, 18.0, 41.0, 11.0, 16.0, 25.0];
    let evaluation = selector.evaluate(&sample);
    let first = select_best(&evaluation).expect("first");
    let second = select_best(&evaluation).expect("second");
    assert_eq!(first, second);
    assert_eq!(selector.evaluate(&sample), evaluation);
}

#[test]
fn ties_go_to_the_earlier_strategy() {
    let sample = [2.0, 4.0, 4.5, 5.0, 7.0, 8.0, 13.0];

    let duplicate_first =
        TransformationCatalog::new(vec![Box::new(Duplicate), Box::new(OriginalTransformation)]);
    let evaluation = NormalitySelector::new(&duplicate_first).evaluate(&sample);
    assert_eq!(select_best(&evaluation), Ok("Duplicate"));

    let original_first =
        TransformationCatalog::new(vec![Box::new(OriginalTransformation), Box::new(Duplicate)]);
    let evaluation = NormalitySelector::new(&original_first).evaluate(&sample);
    assert_eq!(select_best(&evaluation), Ok("Original"));
}

#[test]
fn minus_one_produces_markers_without_failing() {
    let selector = NormalitySelector::new(default_catalog());
    let sample = [-1.0, 0.5, 2.0, 3.0, 4.5, 6.0, 8.0];
    let evaluation = selector.evaluate(&sample);
    assert_eq!(evaluation.len(), 5);

    for name in ["Inverse", "Square Root", "Log"] {
        let entry = evaluation
            .entries()
            .iter()
            .find(|entry| entry.strategy == name)
            .expect("entry present");
        let transformed = entry.transformed.as_ref().expect("applied");
        assert_eq!(transformed.len(), sample.len());
        assert!(!transformed[0].is_finite(), "{name} should mark index 0");
        let result = entry.outcome.as_ref().expect("tested on finite subset");
        assert_eq!(result.excluded, 1);
        assert_eq!(result.tested, sample.len() - 1);
    }

    assert!(matches!(
        evaluation.get("Box-Cox"),
        Some(Err(StrategyFailure::DegenerateInput { .. }))
    ));
    assert!(select_best(&evaluation).is_ok());
}

#[test]
fn constant_sample_fails_only_box_cox() {
    let selector = NormalitySelector::new(default_catalog());
    let evaluation = selector.evaluate(&[7.0; 5]);

    let failures: Vec<_> = evaluation.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Box-Cox");
    assert!(matches!(failures[0].1, StrategyFailure::DegenerateInput { .. }));
    assert_eq!(evaluation.successes().count(), 4);
    assert_eq!(select_best(&evaluation), Ok("Original"));
}

#[test]
fn two_values_fail_every_strategy() {
    let selector = NormalitySelector::new(default_catalog());
    let evaluation = selector.evaluate(&[3.0, 8.0]);
    assert_eq!(evaluation.len(), 5);
    for entry in evaluation.entries() {
        assert_eq!(
            entry.outcome,
            Err(StrategyFailure::InsufficientData { finite: 2 }),
            "{}",
            entry.strategy
        );
    }
    assert_eq!(
        select_best(&evaluation),
        Err(SelectionError::NoViableTransformation { attempted: 5 })
    );
    assert!(selector.apply_best(&[3.0, 8.0]).is_err());
}

#[test]
fn failing_strategy_does_not_abort_evaluation() {
    let catalog =
        TransformationCatalog::new(vec![Box::new(Broken), Box::new(OriginalTransformation)]);
    let selector = NormalitySelector::new(&catalog);
    let (outcome, evaluation) = selector
        .apply_best(&[1.0, 2.0, 2.5, 3.0, 5.0])
        .expect("original still succeeds");
    assert_eq!(outcome.strategy, "Original");
    assert_eq!(
        evaluation.get("Broken"),
        Some(&Err(StrategyFailure::DegenerateInput {
            reason: "always broken".to_string()
        }))
    );
}

#[test]
fn apply_best_returns_untruncated_sample() {
    let catalog = TransformationCatalog::standard();
    let selector = NormalitySelector::new(&catalog);
    // Log-normal shaped data: the log transform should beat the raw values.
    let normal_scores = [-1.5, -1.0, -0.6, -0.3, 0.0, 0.3, 0.6, 1.0, 1.5];
    let sample: Vec<f64> = normal_scores.iter().map(|z: &f64| z.exp() * 10.0 - 1.0).collect();

    let (outcome, evaluation) = selector.apply_best(&sample).expect("selection");
    assert_eq!(outcome.transformed.len(), sample.len());

    let expected = catalog
        .get(&outcome.strategy)
        .expect("winner in catalog")
        .apply(&sample)
        .expect("re-apply");
    assert_eq!(outcome.transformed, expected);

    let p = |name: &str| {
        evaluation
            .get(name)
            .and_then(|outcome| outcome.as_ref().ok())
            .map(|result| result.p_value)
            .expect("evaluated")
    };
    assert!(p("Log") > p("Original"));
}

#[test]
fn apply_best_keeps_non_finite_markers() {
    let catalog = TransformationCatalog::new(vec![Box::new(InverseTransformation)]);
    let selector = NormalitySelector::new(&catalog);
    let sample = [-1.0, 1.0, 2.0, 4.0, 9.0];
    let (outcome, _) = selector.apply_best(&sample).expect("inverse");
    assert_eq!(outcome.strategy, "Inverse");
    assert_eq!(outcome.transformed.len(), 5);
    assert!(outcome.transformed[0].is_infinite());
}

#[test]
fn apply_best_reapplies_the_winner_by_position() {
    let catalog = TransformationCatalog::new(vec![Box::new(BrokenMirror), Box::new(Mirror)]);
    let selector = NormalitySelector::new(&catalog);
    let sample = [1.0, 2.0, 2.5, 3.0, 5.0];

    let evaluation = selector.evaluate(&sample);
    assert_eq!(select_best_index(&evaluation), Ok(1));
    assert_eq!(select_best(&evaluation), Ok("Mirror"));

    let (outcome, _) = selector.apply_best(&sample).expect("identity twin wins");
    assert_eq!(outcome.strategy, "Mirror");
    assert_eq!(outcome.transformed, sample.to_vec());
}
