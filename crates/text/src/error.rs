use thiserror::Error;

/// Result type for text operations
pub type Result<T> = std::result::Result<T, TextError>;

/// Errors that can occur while setting up text normalization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TextError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
