//! A metric bound to a configuration

use crate::algorithms::{
    dice_sorensen_similarity, ngram_overlap_similarity, ngram_similarity,
    normalized_levenshtein_similarity, JaroWinkler, NgramMode, NgramSize, Similarity,
};
use crate::config::ScorerConfig;
use crate::metric::{string_operand, MetricError, StringMetric};
use crate::rounding::round_half_up;
use crate::scalar::Scalar;

/// Configured scorer for one metric.
///
/// Cheap to clone and `Send + Sync`; a single instance can score any number
/// of rows concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    metric: StringMetric,
    config: ScorerConfig,
    jaro_winkler: JaroWinkler,
}

impl Scorer {
    #[must_use]
    pub fn new(metric: StringMetric, config: ScorerConfig) -> Self {
        let jaro_winkler = JaroWinkler::from_config(config.jaro_winkler);
        Self {
            metric,
            config,
            jaro_winkler,
        }
    }

    #[must_use]
    pub fn metric(&self) -> StringMetric {
        self.metric
    }

    #[must_use]
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score two optional strings, applying the configured rounding.
    #[must_use]
    pub fn score(&self, a: Option<&str>, b: Option<&str>) -> Option<f64> {
        let raw = match self.metric {
            StringMetric::NGram2 => self.ngram(NgramSize::Bigram, a, b),
            StringMetric::NGram3 => self.ngram(NgramSize::Trigram, a, b),
            StringMetric::DiceSorensen => dice_sorensen_similarity(a, b),
            StringMetric::NormalizedLevenshtein => normalized_levenshtein_similarity(a, b),
            StringMetric::JaroWinkler => self.jaro_winkler.similarity_opt(a, b),
        }?;
        Some(match self.config.round_digits {
            Some(digits) => round_half_up(raw, digits),
            None => raw,
        })
    }

    /// Score two untyped cells; non-string, non-null operands are rejected.
    pub fn score_scalars(&self, a: &Scalar, b: &Scalar) -> Result<Option<f64>, MetricError> {
        let a = string_operand(a, 1)?;
        let b = string_operand(b, 2)?;
        Ok(self.score(a, b))
    }

    fn ngram(&self, size: NgramSize, a: Option<&str>, b: Option<&str>) -> Option<f64> {
        match self.config.ngram_mode {
            NgramMode::Jaccard => ngram_similarity(size, a, b),
            NgramMode::Overlap => ngram_overlap_similarity(size, a, b),
        }
    }
}

impl From<StringMetric> for Scorer {
    fn from(metric: StringMetric) -> Self {
        Self::new(metric, ScorerConfig::default())
    }
}
