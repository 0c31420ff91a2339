//! Transformation strategy trait and the standard strategies.
//!
//! # Implementing a Strategy
//!
//! A strategy is a unit struct implementing [`TransformationStrategy`]. It
//! must return a sample of the same length as its input and must not fail
//! for element-wise domain violations; emit NaN or an infinity for the
//! offending element instead. Register it in
//! [`TransformationCatalog::new`](crate::TransformationCatalog::new) to have
//! the selector consider it.
//!
//! ```ignore
//! struct Square;
//!
//! impl TransformationStrategy for Square {
//!     fn name(&self) -> &'static str {
//!         "Square"
//!     }
//!
//!     fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
//!         Ok(sample.iter().map(|x| x * x).collect())
//!     }
//! }
//! ```

use perf_common::finite_values;
use perf_model::{NormalityResult, StrategyFailure};

use crate::boxcox::boxcox;
use crate::error::TransformError;
use crate::shapiro::{MIN_SAMPLE_SIZE, shapiro_wilk};

/// A named, pure transformation of a numeric sample.
pub trait TransformationStrategy: Send + Sync {
    /// Display name, unique within a catalog.
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the transformation.
    fn description(&self) -> &'static str {
        "Transformation strategy"
    }

    /// Transforms every element of `sample` into a new sample of equal length.
    ///
    /// # Errors
    ///
    /// Only for inputs the transformation cannot be defined on as a whole
    /// (for example a constant sample for Box-Cox).
    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError>;

    /// Runs the Shapiro-Wilk test on the finite part of an already
    /// transformed sample.
    ///
    /// Non-finite elements are excluded from the test and counted in
    /// [`NormalityResult::excluded`].
    fn test_normality(&self, transformed: &[f64]) -> Result<NormalityResult, StrategyFailure> {
        let finite = finite_values(transformed);
        if finite.len() < MIN_SAMPLE_SIZE {
            return Err(StrategyFailure::InsufficientData {
                finite: finite.len(),
            });
        }
        let test = shapiro_wilk(&finite)?;
        Ok(NormalityResult {
            strategy: self.name().to_string(),
            statistic: test.statistic,
            p_value: test.p_value,
            tested: finite.len(),
            excluded: transformed.len() - finite.len(),
        })
    }
}

/// Identity transformation.
pub struct OriginalTransformation;

impl TransformationStrategy for OriginalTransformation {
    fn name(&self) -> &'static str {
        "Original"
    }

    fn description(&self) -> &'static str {
        "Untransformed values"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.to_vec())
    }
}

/// `ln(x + 1)`; NaN below -1 and negative infinity at -1.
pub struct LogTransformation;

impl TransformationStrategy for LogTransformation {
    fn name(&self) -> &'static str {
        "Log"
    }

    fn description(&self) -> &'static str {
        "Natural log of x + 1"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.iter().map(|x| (x + 1.0).ln()).collect())
    }
}

/// `sqrt(x)`; NaN for negative values.
pub struct SquareRootTransformation;

impl TransformationStrategy for SquareRootTransformation {
    fn name(&self) -> &'static str {
        "Square Root"
    }

    fn description(&self) -> &'static str {
        "Square root of x"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.iter().map(|x| x.sqrt()).collect())
    }
}

/// Box-Cox on `x + 1` with a maximum-likelihood λ.
pub struct BoxCoxTransformation;

impl TransformationStrategy for BoxCoxTransformation {
    fn name(&self) -> &'static str {
        "Box-Cox"
    }

    fn description(&self) -> &'static str {
        "Box-Cox power transform of x + 1, lambda by maximum likelihood"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        let shifted: Vec<f64> = sample.iter().map(|x| x + 1.0).collect();
        boxcox(&shifted).map(|fit| fit.transformed)
    }
}

/// `1 / (x + 1)`; an infinity where `x == -1`.
pub struct InverseTransformation;

impl TransformationStrategy for InverseTransformation {
    fn name(&self) -> &'static str {
        "Inverse"
    }

    fn description(&self) -> &'static str {
        "Reciprocal of x + 1"
    }

    fn apply(&self, sample: &[f64]) -> Result<Vec<f64>, TransformError> {
        Ok(sample.iter().map(|x| 1.0 / (x + 1.0)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normality_counts_excluded_values() {
        let transformed = [1.0, f64::NAN, 2.0, f64::INFINITY, 4.0, 3.5];
        let result = OriginalTransformation
            .test_normality(&transformed)
            .expect("normality result");
        assert_eq!(result.strategy, "Original");
        assert_eq!(result.tested, 4);
        assert_eq!(result.excluded, 2);
    }

    #[test]
    fn test_normality_rejects_short_finite_subset() {
        let transformed = [1.0, f64::NEG_INFINITY, f64::NAN, 2.0];
        let failure = LogTransformation
            .test_normality(&transformed)
            .expect_err("too few finite values");
        assert_eq!(failure, StrategyFailure::InsufficientData { finite: 2 });
    }

    #[test]
    fn box_cox_shifts_before_fitting() {
        // Zero is valid input because of the +1 shift.
        let sample = [0.0, 1.0, 3.0, 7.0, 15.0];
        let transformed = BoxCoxTransformation.apply(&sample).expect("box-cox");
        assert_eq!(transformed.len(), sample.len());
        assert!(transformed.iter().all(|v| v.is_finite()));
        assert!(transformed.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
