use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BillMetaError>;

#[derive(Error, Debug)]
pub enum BillMetaError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data.json for {bill}: {source}")]
    Json {
        bill: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No congress field in data.json for {bill}")]
    MissingCongressField { bill: String },

    #[error("Cannot derive a bill number from path: {0}")]
    PathFormat(String),

    #[error("Identifier error: {0}")]
    Protocol(#[from] bills_protocol::ProtocolError),

    #[error("Extraction task failed for {path}: {message}")]
    TaskFailed { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl BillMetaError {
    /// Records that are skipped silently rather than reported.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::MissingCongressField { .. })
    }
}
