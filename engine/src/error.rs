//! Error types for the journal engine.

use thiserror::Error;

/// All possible errors from the journal engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Projection errors
    #[error("record has no identifier")]
    MissingIdentifier,

    #[error("record cannot be represented remotely: missing {field}")]
    NoRepresentation { field: &'static str },

    // Codec errors
    #[error("failed to encode representation: {0}")]
    Encode(String),

    #[error("failed to decode remote payload: {0}")]
    Decode(String),

    // Storage errors
    #[error("store error: {0}")]
    Store(String),

    #[error("commit failed: {0}")]
    Commit(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
