//! Error types for transformations and the normality test.

use perf_model::StrategyFailure;
use thiserror::Error;

/// A transformation that cannot be applied to a sample as a whole.
///
/// Element-wise domain violations are not errors: strategies emit NaN or
/// infinities for those elements and the selector excludes them at test time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{0}")]
    DegenerateInput(String),
}

/// Failures of the Shapiro-Wilk test itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapiroError {
    #[error("shapiro-wilk needs at least 3 values, got {0}")]
    InsufficientData(usize),
    #[error("shapiro-wilk input contains non-finite values")]
    NonFinite,
    #[error("normal distribution unavailable: {0}")]
    Distribution(String),
}

impl From<TransformError> for StrategyFailure {
    fn from(error: TransformError) -> Self {
        match error {
            TransformError::DegenerateInput(reason) => StrategyFailure::DegenerateInput { reason },
        }
    }
}

impl From<ShapiroError> for StrategyFailure {
    fn from(error: ShapiroError) -> Self {
        match error {
            ShapiroError::InsufficientData(finite) => StrategyFailure::InsufficientData { finite },
            other => StrategyFailure::DegenerateInput {
                reason: other.to_string(),
            },
        }
    }
}
