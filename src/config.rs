//! Scorer configuration
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "jaro_winkler": { "prefix_weight": 0.1, "max_prefix_length": 4 },
//!   "ngram_mode": "overlap",
//!   "round_digits": 2,
//!   "parallel_threshold": 100
//! }
//! ```

use crate::algorithms::{JaroWinklerConfig, NgramMode, MAX_PREFIX_LENGTH, MAX_PREFIX_WEIGHT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum column length for parallel scoring.
///
/// Below this, thread pool coordination costs more than the comparisons.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Errors raised while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("prefix_weight must be a finite number, got {0}")]
    InvalidPrefixWeight(f64),
}

/// Tunables shared by every [`crate::Scorer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub jaro_winkler: JaroWinklerConfig,
    pub ngram_mode: NgramMode,
    /// Round scores half-up to this many decimals; `None` keeps full precision
    pub round_digits: Option<u32>,
    pub parallel_threshold: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            jaro_winkler: JaroWinklerConfig::default(),
            ngram_mode: NgramMode::default(),
            round_digits: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ScorerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reject non-finite prefix weights; clamp the weight and prefix length
    /// into range.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let weight = self.jaro_winkler.prefix_weight;
        if !weight.is_finite() {
            return Err(ConfigError::InvalidPrefixWeight(weight));
        }
        if !(0.0..=MAX_PREFIX_WEIGHT).contains(&weight) {
            tracing::warn!(
                prefix_weight = weight,
                max = MAX_PREFIX_WEIGHT,
                "configured prefix weight clamped"
            );
            self.jaro_winkler.prefix_weight = weight.clamp(0.0, MAX_PREFIX_WEIGHT);
        }
        let length = self.jaro_winkler.max_prefix_length;
        if length > MAX_PREFIX_LENGTH {
            tracing::warn!(
                max_prefix_length = length,
                max = MAX_PREFIX_LENGTH,
                "configured prefix length clamped"
            );
            self.jaro_winkler.max_prefix_length = MAX_PREFIX_LENGTH;
        }
        Ok(self)
    }

    #[must_use]
    pub fn with_round_digits(mut self, digits: u32) -> Self {
        self.round_digits = Some(digits);
        self
    }

    #[must_use]
    pub fn with_ngram_mode(mut self, mode: NgramMode) -> Self {
        self.ngram_mode = mode;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
