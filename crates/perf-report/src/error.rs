//! Error types for report generation.

use thiserror::Error;

use crate::plots::PlotError;

#[derive(Debug, Error)]
pub enum ReportError {
    /// No finite score to derive thresholds from.
    #[error("cannot compute tier thresholds from an empty sample")]
    EmptySample,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Plot(#[from] PlotError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
