//! Jaro and Jaro-Winkler similarity implementations
//!
//! Excellent for name matching and short strings.
//! Jaro-Winkler gives extra weight to common prefixes.
//!
//! # Performance Optimization
//!
//! ASCII operands are compared as bytes; everything else goes through a
//! `char` buffer. Both paths share one generic matcher.

use super::{non_empty_pair, Similarity};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper bound on the prefix weight that keeps scores within [0.0, 1.0]
/// for the default four-character prefix.
pub const MAX_PREFIX_WEIGHT: f64 = 0.25;

/// Longest shared prefix that earns a bonus.
pub const MAX_PREFIX_LENGTH: usize = 4;

const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;

/// Configuration for Jaro-Winkler similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWinklerConfig {
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
    /// Maximum prefix length to consider (typically 4)
    pub max_prefix_length: usize,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            max_prefix_length: MAX_PREFIX_LENGTH,
        }
    }
}

/// Weight actually applied: NaN and infinities fall back to the default,
/// finite values are clamped to `[0, MAX_PREFIX_WEIGHT]`.
#[must_use]
pub fn effective_prefix_weight(weight: f64) -> f64 {
    if !weight.is_finite() {
        DEFAULT_PREFIX_WEIGHT
    } else {
        weight.clamp(0.0, MAX_PREFIX_WEIGHT)
    }
}

/// Jaro-Winkler similarity calculator
///
/// Extends Jaro similarity by giving extra weight to common prefixes.
///
/// # Parameters
/// - `prefix_weight`: How much to boost prefix matches (0.0-0.25, typically 0.1)
/// - `max_prefix_length`: Maximum prefix length to consider (at most 4)
#[derive(Debug, Clone, PartialEq)]
pub struct JaroWinkler {
    pub prefix_weight: f64,
    pub max_prefix_length: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self::from_config(JaroWinklerConfig::default())
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration
    #[must_use]
    pub fn from_config(config: JaroWinklerConfig) -> Self {
        Self {
            prefix_weight: DEFAULT_PREFIX_WEIGHT,
            max_prefix_length: MAX_PREFIX_LENGTH,
        }
        .with_prefix_weight(config.prefix_weight)
        .with_max_prefix_length(config.max_prefix_length)
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        JaroWinklerConfig {
            prefix_weight: self.prefix_weight,
            max_prefix_length: self.max_prefix_length,
        }
    }

    #[must_use]
    pub fn with_prefix_weight(mut self, weight: f64) -> Self {
        if !(0.0..=MAX_PREFIX_WEIGHT).contains(&weight) {
            tracing::warn!(
                prefix_weight = weight,
                max = MAX_PREFIX_WEIGHT,
                "jaro-winkler prefix weight clamped"
            );
        }
        self.prefix_weight = effective_prefix_weight(weight);
        self
    }

    #[must_use]
    pub fn with_max_prefix_length(mut self, length: usize) -> Self {
        if length > MAX_PREFIX_LENGTH {
            tracing::warn!(
                max_prefix_length = length,
                max = MAX_PREFIX_LENGTH,
                "jaro-winkler prefix length clamped"
            );
        }
        self.max_prefix_length = length.min(MAX_PREFIX_LENGTH);
        self
    }
}

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        jaro_winkler_similarity_params(
            Some(a),
            Some(b),
            self.prefix_weight,
            self.max_prefix_length,
        )
    }

    fn name(&self) -> &'static str {
        "jaroWinkler"
    }
}

/// Calculate Jaro similarity between two non-empty strings.
///
/// Operands are put in a fixed order before matching so the greedy
/// matcher gives the same score either way round.
#[inline]
#[must_use]
pub fn jaro_similarity(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let (a, b) = non_empty_pair(a, b)?;
    if a == b {
        return Some(1.0);
    }
    let (a, b) = if b < a { (b, a) } else { (a, b) };

    if a.is_ascii() && b.is_ascii() {
        return Some(jaro_standard(a.as_bytes(), b.as_bytes()));
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    Some(jaro_standard(&a_chars, &b_chars))
}

/// Jaro over any comparable, non-empty slices.
fn jaro_standard<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let a_len = a.len();
    let b_len = b.len();

    // Match window
    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];

    let mut matches = 0usize;

    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matched[j] || a[i] != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters of `a` against matched characters of `b`, in order
    let a_seq = a.iter().zip(a_matched.iter()).filter(|(_, m)| **m).map(|(c, _)| c);
    let b_seq = b.iter().zip(b_matched.iter()).filter(|(_, m)| **m).map(|(c, _)| c);
    let half_transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count();

    let m = matches as f64;
    let t = (half_transpositions / 2) as f64;
    (m / a_len as f64 + m / b_len as f64 + (m - t) / m) / 3.0
}

/// Calculate Jaro-Winkler similarity with custom parameters.
/// Note: prefix_weight goes through [`effective_prefix_weight`] and the prefix
/// is capped at [`MAX_PREFIX_LENGTH`], so the result stays in [0.0, 1.0].
#[inline]
#[must_use]
pub fn jaro_winkler_similarity_params(
    a: Option<&str>,
    b: Option<&str>,
    prefix_weight: f64,
    max_prefix_len: usize,
) -> Option<f64> {
    let jaro_sim = jaro_similarity(a, b)?;
    let (a, b) = non_empty_pair(a, b)?;

    if jaro_sim == 0.0 {
        return Some(0.0);
    }

    let prefix_weight = effective_prefix_weight(prefix_weight);

    let prefix_len = a
        .chars()
        .zip(b.chars())
        .take(max_prefix_len.min(MAX_PREFIX_LENGTH))
        .take_while(|(ac, bc)| ac == bc)
        .count();

    let boosted = jaro_sim + (prefix_len as f64 * prefix_weight * (1.0 - jaro_sim));
    Some(boosted.min(1.0))
}

/// Jaro-Winkler similarity with the standard 0.1 weight over up to four
/// leading characters.
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(a: Option<&str>, b: Option<&str>) -> Option<f64> {
    let config = JaroWinklerConfig::default();
    jaro_winkler_similarity_params(a, b, config.prefix_weight, config.max_prefix_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    fn jaro(a: &str, b: &str) -> f64 {
        jaro_similarity(Some(a), Some(b)).unwrap()
    }

    fn jw(a: &str, b: &str) -> f64 {
        jaro_winkler_similarity(Some(a), Some(b)).unwrap()
    }

    #[test]
    fn test_jaro_basic() {
        assert!(approx_eq(jaro("abc", "abc"), 1.0));
        assert!(approx_eq(jaro("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_jaro_examples() {
        assert!(approx_eq(jaro("MARTHA", "MARHTA"), 0.944));
        assert!(approx_eq(jaro("DWAYNE", "DUANE"), 0.822));
        assert!(approx_eq(jaro("hello", "hallo"), 0.866));
    }

    #[test]
    fn test_jaro_winkler_examples() {
        assert!(approx_eq(jw("MARTHA", "MARHTA"), 0.961));
        assert!(approx_eq(jw("DWAYNE", "DUANE"), 0.84));
        // jaro = (1 + 1 + 6/7) / 3, four-char prefix bonus
        assert!(approx_eq(jw("asdfghj", "asdfhgj"), 0.9714));
    }

    #[test]
    fn test_jaro_winkler_boost() {
        assert!(jw("MARTHA", "MARHTA") > jaro("MARTHA", "MARHTA"));
    }

    #[test]
    fn test_symmetric_ordering() {
        assert_eq!(jw("DWAYNE", "DUANE"), jw("DUANE", "DWAYNE"));
        assert_eq!(jaro("abcab", "bacba"), jaro("bacba", "abcab"));
    }

    #[test]
    fn test_unicode_path_matches_ascii_path() {
        assert!(approx_eq(jaro("MARTHA", "MARHTA"), jaro_standard(
            &"MARTHA".chars().collect::<Vec<_>>(),
            &"MARHTA".chars().collect::<Vec<_>>(),
        )));
        assert!(jaro("cafe", "caf\u{00e9}") > 0.8);
    }

    #[test]
    fn test_empty_is_undefined() {
        assert_eq!(jaro_similarity(Some(""), Some("")), None);
        assert_eq!(jaro_winkler_similarity(Some(""), Some("ads")), None);
        assert_eq!(jaro_winkler_similarity(Some("ads"), None), None);
    }

    #[test]
    fn test_prefix_weight_clamped() {
        let scorer = JaroWinkler::new().with_prefix_weight(0.9);
        assert_eq!(scorer.prefix_weight, MAX_PREFIX_WEIGHT);
        let sim = scorer.similarity("MARTHA", "MARHTA").unwrap();
        assert!(sim <= 1.0);
    }

    #[test]
    fn test_non_finite_weight_uses_default() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let scorer = JaroWinkler::new().with_prefix_weight(weight);
            assert_eq!(scorer.prefix_weight, 0.1);
            assert_eq!(scorer.similarity("abc", "xbz"), Some(jaro("abc", "xbz")));
            assert_eq!(
                jaro_winkler_similarity_params(Some("MARTHA"), Some("MARHTA"), weight, 4),
                Some(jw("MARTHA", "MARHTA"))
            );
        }
        assert!(jaro("abc", "xbz") < 1.0);
    }

    #[test]
    fn test_prefix_length_capped() {
        let scorer = JaroWinkler::new()
            .with_prefix_weight(0.25)
            .with_max_prefix_length(10);
        assert_eq!(scorer.max_prefix_length, MAX_PREFIX_LENGTH);
        assert_eq!(
            scorer.similarity("abcdefghij", "abcdefghik"),
            jaro_winkler_similarity_params(Some("abcdefghij"), Some("abcdefghik"), 0.25, 4)
        );

        // Nine shared leading characters would push 0.2 * 9 past 1.0
        let direct =
            jaro_winkler_similarity_params(Some("abcdefghij"), Some("abcdefghik"), 0.2, 10).unwrap();
        let capped =
            jaro_winkler_similarity_params(Some("abcdefghij"), Some("abcdefghik"), 0.2, 4).unwrap();
        assert_eq!(direct, capped);
        assert!(direct < 1.0, "{direct}");
    }

    #[test]
    fn test_from_config() {
        let scorer = JaroWinkler::from_config(JaroWinklerConfig {
            prefix_weight: 0.0,
            max_prefix_length: 4,
        });
        assert!(approx_eq(
            scorer.similarity("MARTHA", "MARHTA").unwrap(),
            jaro("MARTHA", "MARHTA")
        ));
        assert_eq!(scorer.config().max_prefix_length, 4);
    }
}
