use crate::wire::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    Parse(#[from] ParseError),

    #[error("Transaction id pool exhausted")]
    PoolExhausted,

    #[error("Unknown or expired transaction id {0}")]
    UnknownTransaction(u16),

    #[error("Failed to read hosts file {path}: {reason}")]
    HostsFile { path: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
