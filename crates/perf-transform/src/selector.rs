//! Normality-driven selection of the best transformation.
//!
//! Evaluation is a single pass over the catalog in order. Each strategy is
//! applied to the sample, its non-finite outputs are dropped and the rest is
//! tested with Shapiro-Wilk. A strategy that cannot be applied or tested is
//! recorded as a failure and the pass continues; only an evaluation with no
//! successful strategy at all is an error.

use perf_model::{NormalityResult, SelectionError, SelectionOutcome, StrategyFailure};
use tracing::debug;

use crate::catalog::TransformationCatalog;
use crate::shapiro::MIN_SAMPLE_SIZE;
use crate::strategy::TransformationStrategy;

/// Outcome of one strategy during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyEvaluation {
    pub strategy: String,
    /// The full transformed sample, including non-finite markers.
    /// `None` when the strategy could not be applied.
    pub transformed: Option<Vec<f64>>,
    pub outcome: Result<NormalityResult, StrategyFailure>,
}

/// Per-strategy results in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    entries: Vec<StrategyEvaluation>,
}

impl Evaluation {
    pub fn entries(&self) -> &[StrategyEvaluation] {
        &self.entries
    }

    /// Outcome for a strategy by display name.
    pub fn get(&self, strategy: &str) -> Option<&Result<NormalityResult, StrategyFailure>> {
        self.entries
            .iter()
            .find(|entry| entry.strategy == strategy)
            .map(|entry| &entry.outcome)
    }

    /// Successful results in catalog order.
    pub fn successes(&self) -> impl Iterator<Item = &NormalityResult> + '_ {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_ref().ok())
    }

    /// Failed strategies with their failure, in catalog order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &StrategyFailure)> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            Ok(_) => None,
            Err(failure) => Some((entry.strategy.as_str(), failure)),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<StrategyEvaluation> for Evaluation {
    fn from_iter<I: IntoIterator<Item = StrategyEvaluation>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Picks the strategy with the highest p-value.
///
/// Exact ties go to the strategy that appears first in the evaluation.
///
/// # Errors
///
/// Returns [`SelectionError::NoViableTransformation`] when every strategy
/// failed.
pub fn select_best(evaluation: &Evaluation) -> Result<&str, SelectionError> {
    let index = select_best_index(evaluation)?;
    Ok(evaluation.entries[index].strategy.as_str())
}

/// Position of the winning entry, which is also its catalog position when
/// the evaluation came from [`NormalitySelector::evaluate`].
///
/// # Errors
///
/// Same as [`select_best`].
pub fn select_best_index(evaluation: &Evaluation) -> Result<usize, SelectionError> {
    let mut best: Option<(usize, &NormalityResult)> = None;
    for (index, entry) in evaluation.entries.iter().enumerate() {
        let Ok(candidate) = &entry.outcome else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, current)) => {
                candidate.p_value > current.p_value
                    || (current.p_value.is_nan() && !candidate.p_value.is_nan())
            }
        };
        if better {
            best = Some((index, candidate));
        }
    }
    best.map(|(index, _)| index)
        .ok_or(SelectionError::NoViableTransformation {
            attempted: evaluation.len(),
        })
}

/// Evaluates a catalog against samples and selects the best strategy.
#[derive(Debug, Clone, Copy)]
pub struct NormalitySelector<'a> {
    catalog: &'a TransformationCatalog,
}

impl<'a> NormalitySelector<'a> {
    pub fn new(catalog: &'a TransformationCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a TransformationCatalog {
        self.catalog
    }

    /// Applies and tests every strategy, in catalog order.
    ///
    /// Always returns one entry per strategy. Samples shorter than three
    /// values fail every strategy with `InsufficientData` without applying
    /// it, since no length-preserving transformation can produce enough
    /// values to test.
    pub fn evaluate(&self, sample: &[f64]) -> Evaluation {
        self.catalog
            .list()
            .iter()
            .map(|strategy| evaluate_strategy(strategy.as_ref(), sample))
            .collect()
    }

    /// Evaluates, selects the best strategy and re-applies it to the
    /// original sample.
    ///
    /// The returned sample is the untruncated transformation output, with
    /// any non-finite markers left in place.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if no strategy succeeded.
    pub fn apply_best(
        &self,
        sample: &[f64],
    ) -> Result<(SelectionOutcome, Evaluation), SelectionError> {
        let evaluation = self.evaluate(sample);
        let index = select_best_index(&evaluation)?;
        let name = evaluation.entries[index].strategy.clone();
        let strategy = self
            .catalog
            .list()
            .get(index)
            .filter(|strategy| strategy.name() == name)
            .ok_or_else(|| SelectionError::StrategyUnavailable {
                strategy: name.clone(),
                reason: "not present in catalog".to_string(),
            })?;
        let transformed =
            strategy
                .apply(sample)
                .map_err(|error| SelectionError::StrategyUnavailable {
                    strategy: name.clone(),
                    reason: error.to_string(),
                })?;
        debug!(strategy = %name, "selected transformation");
        Ok((
            SelectionOutcome {
                strategy: name,
                transformed,
            },
            evaluation,
        ))
    }
}

fn evaluate_strategy(strategy: &dyn TransformationStrategy, sample: &[f64]) -> StrategyEvaluation {
    let name = strategy.name().to_string();
    if sample.len() < MIN_SAMPLE_SIZE {
        let finite = sample.iter().filter(|v| v.is_finite()).count();
        debug!(strategy = %name, finite, "sample too small for normality test");
        return StrategyEvaluation {
            strategy: name,
            transformed: None,
            outcome: Err(StrategyFailure::InsufficientData { finite }),
        };
    }

    match strategy.apply(sample) {
        Ok(transformed) => {
            let outcome = strategy.test_normality(&transformed);
            match &outcome {
                Ok(result) => debug!(
                    strategy = %name,
                    statistic = result.statistic,
                    p_value = result.p_value,
                    excluded = result.excluded,
                    "evaluated transformation"
                ),
                Err(failure) => debug!(strategy = %name, %failure, "normality test failed"),
            }
            StrategyEvaluation {
                strategy: name,
                transformed: Some(transformed),
                outcome,
            }
        }
        Err(error) => {
            debug!(strategy = %name, %error, "transformation failed");
            StrategyEvaluation {
                strategy: name,
                transformed: None,
                outcome: Err(error.into()),
            }
        }
    }
}
