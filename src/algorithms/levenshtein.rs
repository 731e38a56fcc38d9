//! Levenshtein (edit) distance implementation
//!
//! Unit-cost insertions, deletions and substitutions over Unicode
//! characters, computed with a single-row DP and normalized by the longer
//! operand.

use super::{non_empty_pair, Similarity};
use smallvec::SmallVec;

/// Single-row DP over char slices.
///
/// Equivalent to the full (m+1)×(n+1) table
/// `dp[i][j] = min(dp[i-1][j]+1, dp[i][j-1]+1, dp[i-1][j-1]+cost)`,
/// keeping only the previous row.
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Shorter string on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Normalized Levenshtein similarity calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using single-row DP optimization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizedLevenshtein;

impl NormalizedLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        normalized_levenshtein_similarity(Some(a), Some(b))
    }

    fn name(&self) -> &'static str {
        "normlevenshtein"
    }
}

/// Raw edit distance between two strings, counted in characters.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// `1 - distance / max(len_a, len_b)`.
///
/// Undefined when either operand is absent or empty, so the zero-length
/// denominator never arises.
#[must_use]
pub fn normalized_levenshtein_similarity(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let (a, b) = non_empty_pair(a, b)?;
    if a == b {
        return Some(1.0);
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    let dist = dp_distance(&a_chars, &b_chars);

    Some(1.0 - dist as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("asdfghj", "asdfhgj"), 2);
    }

    #[test]
    fn test_unicode_counts_chars() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
        assert_eq!(levenshtein_distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_long_strings_spill_smallvec() {
        let a = "a".repeat(100);
        let b = format!("{}b", "a".repeat(99));
        assert_eq!(levenshtein_distance(&a, &b), 1);
        let sim = normalized_levenshtein_similarity(Some(a.as_str()), Some(b.as_str())).unwrap();
        assert!((sim - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_normalized() {
        let sim = normalized_levenshtein_similarity(Some("asdfghj"), Some("asdfhgj")).unwrap();
        assert!((sim - 5.0 / 7.0).abs() < 1e-9);
        assert_eq!(normalized_levenshtein_similarity(Some("abc"), Some("xyz")), Some(0.0));
        assert_eq!(normalized_levenshtein_similarity(Some("abc"), Some("abc")), Some(1.0));
    }

    #[test]
    fn test_empty_is_undefined() {
        assert_eq!(normalized_levenshtein_similarity(Some(""), Some("")), None);
        assert_eq!(normalized_levenshtein_similarity(Some(""), Some("ads")), None);
        assert_eq!(normalized_levenshtein_similarity(None, Some("ads")), None);
    }
}
