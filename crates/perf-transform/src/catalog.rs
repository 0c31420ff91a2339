//! Ordered catalog of transformation strategies.
//!
//! The order matters: the selector evaluates strategies in catalog order
//! and breaks exact p-value ties in favour of the earlier entry.

use std::fmt;
use std::sync::OnceLock;

use crate::strategy::{
    BoxCoxTransformation, InverseTransformation, LogTransformation, OriginalTransformation,
    SquareRootTransformation, TransformationStrategy,
};

/// An ordered list of strategies.
pub struct TransformationCatalog {
    strategies: Vec<Box<dyn TransformationStrategy>>,
}

impl TransformationCatalog {
    /// Creates a catalog from strategies in evaluation order.
    pub fn new(strategies: Vec<Box<dyn TransformationStrategy>>) -> Self {
        Self { strategies }
    }

    /// The five standard strategies: Original, Log, Square Root, Box-Cox, Inverse.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(OriginalTransformation),
            Box::new(LogTransformation),
            Box::new(SquareRootTransformation),
            Box::new(BoxCoxTransformation),
            Box::new(InverseTransformation),
        ])
    }

    /// Strategies in evaluation order.
    pub fn list(&self) -> &[Box<dyn TransformationStrategy>] {
        &self.strategies
    }

    /// Looks a strategy up by its display name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&dyn TransformationStrategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(name))
            .map(|strategy| strategy.as_ref())
    }

    /// Returns an iterator over strategy names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|strategy| strategy.name())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for TransformationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for TransformationCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Cached standard catalog.
static DEFAULT_CATALOG: OnceLock<TransformationCatalog> = OnceLock::new();

/// Returns the standard catalog, built on first access.
pub fn default_catalog() -> &'static TransformationCatalog {
    DEFAULT_CATALOG.get_or_init(TransformationCatalog::standard)
}
