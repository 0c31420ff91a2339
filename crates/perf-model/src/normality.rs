//! Normality test outcomes and transformation selection results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shapiro-Wilk outcome for one transformation strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// Display name of the strategy that produced the tested sample.
    pub strategy: String,
    /// W statistic, in `(0, 1]`.
    pub statistic: f64,
    /// p-value, in `[0, 1]`. Higher means a better fit to a normal distribution.
    pub p_value: f64,
    /// Number of finite values the test ran on.
    pub tested: usize,
    /// Non-finite values (domain violations) excluded before testing.
    pub excluded: usize,
}

impl NormalityResult {
    /// Whether the null hypothesis of normality survives at `alpha`.
    pub fn is_normal_at(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Why a single strategy could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyFailure {
    /// Fewer than three finite values were left to test.
    #[error("insufficient data: {finite} finite value(s), at least 3 required")]
    InsufficientData { finite: usize },
    /// The strategy cannot be fitted to this sample at all.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },
}

/// Selection could not produce a transformed sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Every strategy in the catalog failed.
    #[error("no transformation could be evaluated ({attempted} attempted, all failed)")]
    NoViableTransformation { attempted: usize },
    /// The winning strategy could not be re-applied to the full sample.
    #[error("selected transformation {strategy} unavailable: {reason}")]
    StrategyUnavailable { strategy: String, reason: String },
}

/// The winning strategy together with the full transformed sample.
///
/// The sample is produced from the original input, so it keeps any
/// non-finite markers the strategy emits and has the input's length.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome {
    pub strategy: String,
    pub transformed: Vec<f64>,
}
