//! Percentile thresholds and tier assignment.

use perf_common::percentile;
use perf_model::{CategorizedEmployee, PerformanceTier, ScoredEmployee, TierThresholds};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Thresholds at the 30th, 60th, 80th and 90th percentiles of `scores`.
///
/// Non-finite scores are ignored.
///
/// # Errors
///
/// Returns [`ReportError::EmptySample`] if `scores` has no finite value.
pub fn compute_thresholds(scores: &[f64]) -> Result<TierThresholds> {
    let at = |tier: PerformanceTier| {
        percentile(scores, tier.percentile()).ok_or(ReportError::EmptySample)
    };
    let thresholds = TierThresholds {
        poor: at(PerformanceTier::Poor)?,
        average: at(PerformanceTier::Average)?,
        good: at(PerformanceTier::Good)?,
        best: at(PerformanceTier::Best)?,
    };
    debug!(?thresholds, "computed tier thresholds");
    Ok(thresholds)
}

/// Assigns each employee a tier.
///
/// The result is ordered by tier name ascending, then score descending;
/// employees with equal tier and score keep their input order.
pub fn categorize(
    employees: &[ScoredEmployee],
    thresholds: &TierThresholds,
) -> Vec<CategorizedEmployee> {
    let mut categorized: Vec<CategorizedEmployee> = employees
        .iter()
        .map(|employee| CategorizedEmployee {
            employee_id: employee.employee_id.clone(),
            tier: thresholds.classify(employee.score),
            score: employee.score,
        })
        .collect();
    categorized.sort_by(|a, b| {
        a.tier
            .as_str()
            .cmp(b.tier.as_str())
            .then_with(|| b.score.total_cmp(&a.score))
    });
    categorized
}

/// Number of employees per tier, lowest tier first. Every tier is listed.
pub fn tier_counts(categorized: &[CategorizedEmployee]) -> Vec<(PerformanceTier, usize)> {
    PerformanceTier::ALL
        .into_iter()
        .map(|tier| {
            let count = categorized.iter().filter(|e| e.tier == tier).count();
            (tier, count)
        })
        .collect()
}
