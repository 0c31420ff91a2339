//! Reporting for the performance analysis.
//!
//! Tiering lives here rather than in the model crate because it depends on
//! the score distribution: thresholds are percentiles of the raw composite
//! scores and only make sense once the whole sample is known.

pub mod csv_output;
pub mod error;
pub mod plots;
pub mod summary;
pub mod tiers;

pub use csv_output::{CATEGORIZED_CSV_FILE, write_categorized_csv};
pub use error::{ReportError, Result};
pub use plots::{
    HistogramBin, NORMAL_PLOT_FILE, PERFORMANCE_HISTOGRAM_FILE, PlotError,
    TRANSFORMATION_HISTOGRAMS_FILE, density_histogram, plot_normal_distribution,
    plot_performance_histogram, plot_transformation_histograms,
};
pub use summary::{
    ANALYSIS_SUMMARY_FILE, AnalysisSummary, NormalitySummary, RecordCounts, StrategySummary,
    TierCount, write_analysis_summary_json,
};
pub use tiers::{categorize, compute_thresholds, tier_counts};
