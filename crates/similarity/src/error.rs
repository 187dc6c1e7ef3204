use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimilarityError>;

#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("Cannot read comparison input {path}: {source}")]
    ComparisonInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Identifier error: {0}")]
    Protocol(#[from] bills_protocol::ProtocolError),

    #[error("Tokenizer error: {0}")]
    Text(#[from] bills_text::TextError),

    #[error("N-gram task failed: {0}")]
    TaskFailed(String),
}
