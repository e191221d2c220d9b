//! Transport layer abstraction for the remote document store.

mod http;

pub use http::HttpTransport;

use reqwest::Url;
use std::fmt;
use std::future::Future;

/// A failed request against the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    /// A request that never produced a response.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// A response with a non-success status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::status(status.as_u16(), err.to_string()),
            None => Self::network(err.to_string()),
        }
    }
}

/// Result type for transport calls.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// HTTP-style access to a keyed document endpoint.
///
/// Implementations do not retry; a failed call is reported as-is.
pub trait RemoteTransport: Send + Sync + 'static {
    /// Fetch the body at `url`. An absent body is an empty vector.
    fn get(&self, url: &Url) -> impl Future<Output = TransportResult<Vec<u8>>> + Send;

    /// Store `body` at `url`, replacing whatever was there.
    fn put(&self, url: &Url, body: Vec<u8>) -> impl Future<Output = TransportResult<()>> + Send;

    /// Remove the document at `url`.
    fn delete(&self, url: &Url) -> impl Future<Output = TransportResult<()>> + Send;
}
