use crate::error::{Result, SimilarityError};
use bills_text::{TokenizerConfig, DEFAULT_NGRAM_SIZE};
use serde::{Deserialize, Serialize};

/// Classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Score above which one document is taken to incorporate the other
    pub incorporate: f64,

    /// Maximum reciprocal/score ratio for an incorporation
    pub incorporate_ratio: f64,

    /// Both scores below this → unrelated
    pub unrelated: f64,

    /// Both scores above this (plus the size or tolerance test) → nearly identical
    pub nearly_identical: f64,

    /// Allowed `1 - score / reciprocal` for small documents to count as nearly identical
    pub nearly_identical_tolerance: f64,

    /// Documents with more n-grams than this skip the tolerance test
    pub minimum_total: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            incorporate: 0.8,
            incorporate_ratio: 0.2,
            unrelated: 0.1,
            nearly_identical: 0.8,
            nearly_identical_tolerance: 0.1,
            minimum_total: 150,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        let unit = [
            ("incorporate", self.incorporate),
            ("incorporate_ratio", self.incorporate_ratio),
            ("unrelated", self.unrelated),
            ("nearly_identical", self.nearly_identical),
            ("nearly_identical_tolerance", self.nearly_identical_tolerance),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimilarityError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for document comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Tokens per n-gram
    pub ngram_size: usize,

    pub thresholds: Thresholds,

    pub tokenizer: TokenizerConfig,

    pub word_sample: WordSampleConfig,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
            thresholds: Thresholds::default(),
            tokenizer: TokenizerConfig::default(),
            word_sample: WordSampleConfig::default(),
        }
    }
}

impl SimilarityConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(SimilarityError::InvalidConfig(
                "ngram_size must be > 0".to_string(),
            ));
        }
        self.thresholds.validate()?;
        self.tokenizer.validate()?;
        self.word_sample.validate()?;
        Ok(())
    }
}

pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.05;
pub const DEFAULT_MAX_SAMPLE_WORDS: usize = 10_000;

/// Word sampling over bill documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSampleConfig {
    /// Share of each document's tokens drawn into the sample
    pub fraction: f64,

    /// Cap on the pooled sample
    pub max_words: usize,

    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for WordSampleConfig {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_SAMPLE_FRACTION,
            max_words: DEFAULT_MAX_SAMPLE_WORDS,
            seed: None,
        }
    }
}

impl WordSampleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fraction) {
            return Err(SimilarityError::InvalidConfig(format!(
                "word_sample.fraction must be within [0, 1], got {}",
                self.fraction
            )));
        }
        if self.max_words == 0 {
            return Err(SimilarityError::InvalidConfig(
                "word_sample.max_words must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
