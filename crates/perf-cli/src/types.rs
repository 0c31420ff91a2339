use std::path::PathBuf;

use perf_ingest::{CleaningReport, DEFAULT_CAP_QUANTILE};
use perf_model::{NormalityResult, PerformanceTier, TierThresholds};
use perf_transform::Evaluation;

/// Default significance level for the normality test.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Significance level; a p-value above it counts as normal.
    pub alpha: f64,
    /// Upper quantile for capping score fields; `None` disables capping.
    pub cap_quantile: Option<f64>,
    pub bins: usize,
    pub plots: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from("."),
            alpha: DEFAULT_ALPHA,
            cap_quantile: Some(DEFAULT_CAP_QUANTILE),
            bins: DEFAULT_BINS,
            plots: true,
        }
    }
}

impl AnalysisOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct OutputPaths {
    pub categorized_csv: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub plots: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub alpha: f64,
    pub cleaning: CleaningReport,
    pub employees: usize,
    pub initial_normality: Option<NormalityResult>,
    pub evaluation: Evaluation,
    pub selected_strategy: String,
    pub post_transform_normality: Option<NormalityResult>,
    pub thresholds: TierThresholds,
    pub tier_counts: Vec<(PerformanceTier, usize)>,
    pub outputs: OutputPaths,
}
