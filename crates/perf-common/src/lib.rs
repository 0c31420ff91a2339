//! Shared utilities for the performance tiering crates.
//!
//! This crate provides Polars value conversions used during ingestion and
//! the small set of descriptive statistics shared by cleaning, tiering
//! and plotting.

pub mod polars_utils;
pub mod stats;

// Re-export commonly used functions at crate root for convenience
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use stats::{finite_values, mean, percentile, population_std_dev};
