//! CLI library components for performance tiering.

pub mod logging;
pub mod pipeline;
pub mod types;
