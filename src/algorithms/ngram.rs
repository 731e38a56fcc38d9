//! N-gram similarity implementation
//!
//! Compares strings based on shared n-character substrings ("shingles").
//! Shingles come from a plain sliding window: no padding, no case folding.
//!
//! # N-gram Sizes
//!
//! Only bigrams and trigrams are exposed through [`NgramSize`]; the
//! extraction helpers accept any `n` and return nothing for `n = 0`.

use super::{non_empty_pair, Similarity};
use crate::metric::MetricError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Supported shingle lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NgramSize {
    Bigram,
    Trigram,
}

impl NgramSize {
    #[inline]
    #[must_use]
    pub fn width(self) -> usize {
        match self {
            Self::Bigram => 2,
            Self::Trigram => 3,
        }
    }
}

impl TryFrom<usize> for NgramSize {
    type Error = MetricError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(Self::Bigram),
            3 => Ok(Self::Trigram),
            other => Err(MetricError::UnsupportedNgramSize(other)),
        }
    }
}

/// How two shingle collections are turned into a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NgramMode {
    /// |A ∩ B| / |A ∪ B| over shingle sets
    #[default]
    Jaccard,
    /// Multiset matches divided by the longer shingle list
    Overlap,
}

/// N-gram similarity calculator
///
/// # Complexity
/// - Time: O(m+n) for n-gram extraction and comparison
/// - Space: O(m+n) for n-gram sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ngram {
    pub size: NgramSize,
    pub mode: NgramMode,
}

impl Ngram {
    #[must_use]
    pub fn new(size: NgramSize) -> Self {
        Self {
            size,
            mode: NgramMode::Jaccard,
        }
    }

    #[must_use]
    pub fn bigram() -> Self {
        Self::new(NgramSize::Bigram)
    }

    #[must_use]
    pub fn trigram() -> Self {
        Self::new(NgramSize::Trigram)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: NgramMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Similarity for Ngram {
    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        match self.mode {
            NgramMode::Jaccard => ngram_similarity(self.size, Some(a), Some(b)),
            NgramMode::Overlap => ngram_overlap_similarity(self.size, Some(a), Some(b)),
        }
    }

    fn name(&self) -> &'static str {
        match self.size {
            NgramSize::Bigram => "nGram2",
            NgramSize::Trigram => "nGram3",
        }
    }
}

/// Dice–Sorensen coefficient over bigram sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiceSorensen;

impl Similarity for DiceSorensen {
    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        dice_sorensen_similarity(Some(a), Some(b))
    }

    fn name(&self) -> &'static str {
        "diceSorensen"
    }
}

/// Extract n-grams from a string, in order, duplicates kept.
#[must_use]
pub fn extract_ngrams(s: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return vec![];
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < n {
        return vec![];
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Extract n-grams as a set for fast comparison
#[must_use]
pub fn ngram_set(s: &str, n: usize) -> AHashSet<String> {
    extract_ngrams(s, n).into_iter().collect()
}

fn shingle_sets(a: &str, b: &str, n: usize) -> Option<(AHashSet<String>, AHashSet<String>)> {
    let a_set = ngram_set(a, n);
    let b_set = ngram_set(b, n);
    if a_set.is_empty() || b_set.is_empty() {
        return None;
    }
    Some((a_set, b_set))
}

/// Jaccard similarity over n-gram sets.
///
/// Returns `None` when either operand is absent or too short to yield a
/// single shingle.
#[must_use]
pub fn ngram_similarity(size: NgramSize, a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let (a, b) = non_empty_pair(a, b)?;
    let (a_set, b_set) = shingle_sets(a, b, size.width())?;

    let intersection = a_set.intersection(&b_set).count();
    let union = a_set.len() + b_set.len() - intersection;
    Some(intersection as f64 / union as f64)
}

/// Sørensen-Dice coefficient over bigram sets.
#[must_use]
pub fn dice_sorensen_similarity(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let (a, b) = non_empty_pair(a, b)?;
    let (a_set, b_set) = shingle_sets(a, b, NgramSize::Bigram.width())?;

    let intersection = a_set.intersection(&b_set).count();
    Some((2.0 * intersection as f64) / (a_set.len() + b_set.len()) as f64)
}

/// Profile-based n-gram overlap.
///
/// Counts matching shingles as a multiset (each occurrence matched at most
/// once) and divides by the longer shingle list.
#[must_use]
pub fn ngram_overlap_similarity(size: NgramSize, a: Option<&str>, b: Option<&str>) -> Option<f64> {
    fn build_profile(grams: &[String]) -> AHashMap<&str, usize> {
        let mut profile = AHashMap::with_capacity(grams.len());
        for gram in grams {
            *profile.entry(gram.as_str()).or_insert(0) += 1;
        }
        profile
    }

    let (a, b) = non_empty_pair(a, b)?;
    let a_grams = extract_ngrams(a, size.width());
    let b_grams = extract_ngrams(b, size.width());
    if a_grams.is_empty() || b_grams.is_empty() {
        return None;
    }

    let a_profile = build_profile(&a_grams);
    let b_profile = build_profile(&b_grams);
    let matches: usize = a_profile
        .iter()
        .map(|(gram, &count)| count.min(b_profile.get(gram).copied().unwrap_or(0)))
        .sum();

    Some(matches as f64 / a_grams.len().max(b_grams.len()) as f64)
}
