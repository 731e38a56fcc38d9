//! Core string similarity algorithms
//!
//! Each algorithm is implemented as a standalone function for composability,
//! plus a trait-based interface for extensibility.
//!
//! Every metric returns `Option<f64>`: `None` means the score is undefined
//! for the inputs (an operand is absent, empty, or too short to tokenize).

pub mod jaro;
pub mod levenshtein;
pub mod ngram;

pub use jaro::*;
pub use levenshtein::*;
pub use ngram::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical),
/// or `None` when the metric is undefined for the inputs.
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> Option<f64>;

    /// Null-aware entry point for column values
    fn similarity_opt(&self, a: Option<&str>, b: Option<&str>) -> Option<f64> {
        self.similarity(a?, b?)
    }

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> Option<f64> {
        self.similarity(a, b).map(|sim| 1.0 - sim)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Both operands present and non-empty, or `None`.
#[inline]
pub(crate) fn non_empty_pair<'a>(
    a: Option<&'a str>,
    b: Option<&'a str>,
) -> Option<(&'a str, &'a str)> {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Some((a, b)),
        _ => None,
    }
}
