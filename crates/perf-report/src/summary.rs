//! JSON analysis summary.

use std::path::{Path, PathBuf};

use chrono::Utc;
use perf_model::{NormalityResult, PerformanceTier, StrategyFailure, TierThresholds};
use perf_transform::Evaluation;
use serde::Serialize;

use crate::error::Result;

pub const ANALYSIS_SUMMARY_FILE: &str = "analysis_summary.json";

const SUMMARY_SCHEMA: &str = "perf-tiers.analysis-summary";
const SUMMARY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub input_rows: usize,
    pub kept_rows: usize,
    pub dropped_missing: usize,
    pub dropped_invalid: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalitySummary {
    pub statistic: f64,
    pub p_value: f64,
    pub tested: usize,
    pub excluded: usize,
    pub is_normal: bool,
}

impl NormalitySummary {
    pub fn new(result: &NormalityResult, alpha: f64) -> Self {
        Self {
            statistic: result.statistic,
            p_value: result.p_value,
            tested: result.tested,
            excluded: result.excluded,
            is_normal: result.is_normal_at(alpha),
        }
    }
}

/// One catalog entry: either its normality result or why it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normality: Option<NormalitySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StrategyFailure>,
}

impl StrategySummary {
    /// Summaries for every evaluated strategy, in catalog order.
    pub fn from_evaluation(evaluation: &Evaluation, alpha: f64) -> Vec<Self> {
        evaluation
            .entries()
            .iter()
            .map(|entry| match &entry.outcome {
                Ok(result) => Self {
                    strategy: entry.strategy.clone(),
                    normality: Some(NormalitySummary::new(result, alpha)),
                    failure: None,
                },
                Err(failure) => Self {
                    strategy: entry.strategy.clone(),
                    normality: None,
                    failure: Some(failure.clone()),
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: PerformanceTier,
    pub count: usize,
}

/// Everything the analysis reports about one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub source: String,
    pub alpha: f64,
    pub records: RecordCounts,
    /// Shapiro-Wilk on the raw composite scores; `None` when the sample was
    /// too small to test.
    pub initial_normality: Option<NormalitySummary>,
    pub strategies: Vec<StrategySummary>,
    pub selected_strategy: Option<String>,
    pub post_transform_normality: Option<NormalitySummary>,
    pub thresholds: TierThresholds,
    pub tier_counts: Vec<TierCount>,
}

#[derive(Serialize)]
struct AnalysisSummaryPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    #[serde(flatten)]
    summary: &'a AnalysisSummary,
}

/// Writes `summary` to [`ANALYSIS_SUMMARY_FILE`] under `output_dir`.
pub fn write_analysis_summary_json(output_dir: &Path, summary: &AnalysisSummary) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(ANALYSIS_SUMMARY_FILE);
    let payload = AnalysisSummaryPayload {
        schema: SUMMARY_SCHEMA,
        schema_version: SUMMARY_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        summary,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))?;
    Ok(output_path)
}
