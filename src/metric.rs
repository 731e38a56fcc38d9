//! Named metric selection and dispatch
//!
//! [`StringMetric`] is the enum-dispatched counterpart of the individual
//! metric functions. Names follow the column-function vocabulary
//! (`nGram2`, `nGram3`, `diceSorensen`, `normlevenshtein`, `jaroWinkler`).

use crate::algorithms::{
    dice_sorensen_similarity, jaro_winkler_similarity, ngram_similarity,
    normalized_levenshtein_similarity, NgramSize,
};
use crate::scalar::{Scalar, ScalarType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a metric is selected or called incorrectly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// Metric name not recognised
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Only bigrams and trigrams are supported
    #[error("Unsupported n-gram size {0}: expected 2 or 3")]
    UnsupportedNgramSize(usize),

    /// A metric operand was not a string
    #[error("Operand {position} must be a string, got {found}")]
    NotAString { position: usize, found: ScalarType },
}

/// Similarity metric selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringMetric {
    #[serde(rename = "nGram2")]
    NGram2,
    #[serde(rename = "nGram3")]
    NGram3,
    #[serde(rename = "diceSorensen")]
    DiceSorensen,
    #[serde(rename = "normlevenshtein")]
    NormalizedLevenshtein,
    #[serde(rename = "jaroWinkler")]
    JaroWinkler,
}

impl StringMetric {
    pub const ALL: [StringMetric; 5] = [
        Self::NGram2,
        Self::NGram3,
        Self::DiceSorensen,
        Self::NormalizedLevenshtein,
        Self::JaroWinkler,
    ];

    /// N-gram metric for a shingle width of 2 or 3
    pub fn ngram(n: usize) -> Result<Self, MetricError> {
        match NgramSize::try_from(n)? {
            NgramSize::Bigram => Ok(Self::NGram2),
            NgramSize::Trigram => Ok(Self::NGram3),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NGram2 => "nGram2",
            Self::NGram3 => "nGram3",
            Self::DiceSorensen => "diceSorensen",
            Self::NormalizedLevenshtein => "normlevenshtein",
            Self::JaroWinkler => "jaroWinkler",
        }
    }

    /// Score two optional strings with default parameters.
    #[inline]
    #[must_use]
    pub fn score(&self, a: Option<&str>, b: Option<&str>) -> Option<f64> {
        match self {
            Self::NGram2 => ngram_similarity(NgramSize::Bigram, a, b),
            Self::NGram3 => ngram_similarity(NgramSize::Trigram, a, b),
            Self::DiceSorensen => dice_sorensen_similarity(a, b),
            Self::NormalizedLevenshtein => normalized_levenshtein_similarity(a, b),
            Self::JaroWinkler => jaro_winkler_similarity(a, b),
        }
    }

    /// Score two untyped cells.
    ///
    /// Nulls give an undefined score; any other non-string operand is a
    /// contract violation.
    pub fn score_scalars(&self, a: &Scalar, b: &Scalar) -> Result<Option<f64>, MetricError> {
        let a = string_operand(a, 1)?;
        let b = string_operand(b, 2)?;
        Ok(self.score(a, b))
    }
}

pub(crate) fn string_operand(value: &Scalar, position: usize) -> Result<Option<&str>, MetricError> {
    match value {
        Scalar::Null => Ok(None),
        Scalar::Str(s) => Ok(Some(s)),
        other => Err(MetricError::NotAString {
            position,
            found: other.scalar_type().unwrap_or(ScalarType::String),
        }),
    }
}

impl fmt::Display for StringMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StringMetric {
    type Err = MetricError;

    /// Accepts the canonical names case-insensitively, plus snake_case aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ngram2" | "ngram_2" | "bigram" => Ok(Self::NGram2),
            "ngram3" | "ngram_3" | "trigram" => Ok(Self::NGram3),
            "dicesorensen" | "dice_sorensen" | "dice" => Ok(Self::DiceSorensen),
            "normlevenshtein" | "normalized_levenshtein" | "levenshtein" => {
                Ok(Self::NormalizedLevenshtein)
            }
            "jarowinkler" | "jaro_winkler" => Ok(Self::JaroWinkler),
            _ => Err(MetricError::UnknownMetric(s.to_string())),
        }
    }
}
