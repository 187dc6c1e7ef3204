use crate::error::{Result, TextError};
use serde::{Deserialize, Serialize};

/// Default punctuation set; tokens containing any of these characters are dropped.
pub const DEFAULT_EXCLUDED_PUNCTUATION: &str = "-./(),!@#$%^&*:\\;";

/// Default minimum token length (in characters).
pub const DEFAULT_MIN_TOKEN_LEN: usize = 4;

/// Default n-gram window used for document comparison.
pub const DEFAULT_NGRAM_SIZE: usize = 4;

/// Configuration for tokenization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Tokens shorter than this are dropped
    pub min_token_len: usize,

    /// Tokens containing any of these characters are dropped
    pub excluded_punctuation: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            excluded_punctuation: DEFAULT_EXCLUDED_PUNCTUATION.to_string(),
        }
    }
}

impl TokenizerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(TextError::invalid_config("min_token_len must be > 0"));
        }
        if self.excluded_punctuation.chars().any(char::is_alphanumeric) {
            return Err(TextError::invalid_config(format!(
                "excluded_punctuation must not contain letters or digits: {:?}",
                self.excluded_punctuation
            )));
        }
        Ok(())
    }
}
