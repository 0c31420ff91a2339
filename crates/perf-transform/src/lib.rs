//! Transformation catalog and normality-driven strategy selection.
//!
//! A [`TransformationCatalog`] holds an ordered set of
//! [`TransformationStrategy`] implementations. The [`NormalitySelector`]
//! applies each one to a sample, scores the result with the Shapiro-Wilk
//! test and picks the strategy whose output looks most normal.

pub mod boxcox;
pub mod catalog;
pub mod error;
pub mod selector;
pub mod shapiro;
pub mod strategy;

pub use boxcox::{BoxCoxFit, boxcox, boxcox_llf, boxcox_transform};
pub use catalog::{TransformationCatalog, default_catalog};
pub use error::{ShapiroError, TransformError};
pub use selector::{
    Evaluation, NormalitySelector, StrategyEvaluation, select_best, select_best_index,
};
pub use shapiro::{MIN_SAMPLE_SIZE, ShapiroWilk, shapiro_wilk};
pub use strategy::{
    BoxCoxTransformation, InverseTransformation, LogTransformation, OriginalTransformation,
    SquareRootTransformation, TransformationStrategy,
};
