//! FuzzyCol - per-row column functions for tabular data
//!
//! String similarity metrics and categorical lookups, written as pure
//! functions so a host table engine can apply them to every row of a column.
//!
//! # Features
//! - N-gram (Jaccard), Dice–Sorensen, normalized Levenshtein and
//!   Jaro–Winkler similarity, each returning `None` when undefined
//! - Table-driven lookups with a default for unmapped or null inputs
//! - Column extension traits with parallel application for large columns
//! - Half-up decimal rounding for reported scores
//!
//! # Example
//!
//! ```
//! use fuzzycol::{jaro_winkler_similarity, round_half_up};
//!
//! let score = jaro_winkler_similarity(Some("asdfghj"), Some("asdfhgj")).unwrap();
//! assert_eq!(round_half_up(score, 2), 0.97);
//! assert_eq!(jaro_winkler_similarity(Some(""), Some("ads")), None);
//! ```

pub mod algorithms;
pub mod column;
pub mod config;
pub mod lookup;
pub mod metric;
pub mod rounding;
pub mod scalar;
pub mod scorer;

pub use algorithms::{
    dice_sorensen_similarity, extract_ngrams, jaro_similarity, jaro_winkler_similarity,
    jaro_winkler_similarity_params, levenshtein_distance, ngram_overlap_similarity, ngram_set,
    ngram_similarity, normalized_levenshtein_similarity, DiceSorensen, JaroWinkler,
    JaroWinklerConfig, Ngram, NgramMode, NgramSize, NormalizedLevenshtein, Similarity,
};
pub use column::{
    map_scalar_column, score_columns, score_scalar_columns, ColumnError, LookupColumnExt,
    SimilarityColumnExt,
};
pub use config::{ConfigError, ScorerConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use lookup::{build_categorical_lookup, CategoricalLookup, LookupError, ScalarLookup};
pub use metric::{MetricError, StringMetric};
pub use rounding::round_half_up;
pub use scalar::{Scalar, ScalarType};
pub use scorer::Scorer;

/// `n`-gram Jaccard similarity for a shingle width given as an integer.
///
/// Widths other than 2 and 3 are rejected.
pub fn ngram_similarity_n(
    n: usize,
    a: Option<&str>,
    b: Option<&str>,
) -> Result<Option<f64>, MetricError> {
    let size = NgramSize::try_from(n)?;
    Ok(ngram_similarity(size, a, b))
}
