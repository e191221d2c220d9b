//! Unified error handling for sync operations.

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Sync error type.
///
/// Every variant is terminal for the call that produced it; nothing at this
/// layer retries. `Clone` so that callers joined on one in-flight pull can
/// each receive the same failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("record has no identifier")]
    MissingIdentifier,

    #[error("record has no remote representation: missing {0}")]
    NoRepresentation(&'static str),

    #[error("Encode error: {0}")]
    EncodeFailure(String),

    #[error("Decode error: {0}")]
    DecodeFailure(String),

    #[error("remote returned no data")]
    NoData,

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Commit error: {0}")]
    CommitFailure(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<journal_engine::Error> for SyncError {
    fn from(err: journal_engine::Error) -> Self {
        use journal_engine::Error;

        match err {
            Error::MissingIdentifier => SyncError::MissingIdentifier,
            Error::NoRepresentation { field } => SyncError::NoRepresentation(field),
            Error::Encode(msg) => SyncError::EncodeFailure(msg),
            Error::Decode(msg) => SyncError::DecodeFailure(msg),
            Error::Commit(msg) => SyncError::CommitFailure(msg),
            Error::Store(msg) | Error::InvalidSnapshot(msg) => SyncError::Storage(msg),
        }
    }
}

impl From<ConfigError> for SyncError {
    fn from(err: ConfigError) -> Self {
        SyncError::Config(err.to_string())
    }
}

/// Result type alias for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
