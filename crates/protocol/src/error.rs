use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The string does not look like `{congress}{type}{number}{version?}`
    #[error("Not a bill number: {0}")]
    PathFormat(String),

    /// The string does not look like `{type}{number}-{congress}`
    #[error("Not a bill id: {0}")]
    InvalidBillId(String),

    #[error("Bill number has no text version: {bill}")]
    MissingVersion { bill: String },
}
