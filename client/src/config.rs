//! Configuration management for the sync client.

use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote collection root
    pub endpoint: RemoteEndpoint,
    /// Local journal snapshot file
    pub store_path: PathBuf,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let remote_url =
            env::var("JOURNAL_REMOTE_URL").map_err(|_| ConfigError::MissingRemoteUrl)?;
        let endpoint = RemoteEndpoint::parse(&remote_url)?;

        let store_path = env::var("JOURNAL_STORE_PATH")
            .unwrap_or_else(|_| "journal.json".to_string())
            .into();

        let http_timeout = env::var("JOURNAL_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidTimeout)?;

        Ok(Self {
            endpoint,
            store_path,
            http_timeout,
        })
    }
}

/// Addressing for a keyed-document collection.
///
/// The root names the collection (`https://host/entries`); the whole
/// collection lives at `entries.json` and each document at
/// `entries/<identifier>.json`. Query parameters on the root are kept on
/// every derived URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    root: Url,
}

impl RemoteEndpoint {
    /// Create an endpoint from a collection root URL.
    pub fn new(mut root: Url) -> Result<Self, ConfigError> {
        if root.cannot_be_a_base() || !matches!(root.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidRemoteUrl(root.to_string()));
        }

        let trimmed = root.path().trim_end_matches('/').to_string();
        root.set_path(&trimmed);

        Ok(Self { root })
    }

    /// Parse and validate a collection root URL.
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let root = Url::parse(url).map_err(|_| ConfigError::InvalidRemoteUrl(url.to_string()))?;
        Self::new(root)
    }

    /// The collection root as configured.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// URL of the full collection.
    pub fn collection_url(&self) -> Url {
        let mut url = self.root.clone();
        let path = format!("{}.json", self.root.path());
        url.set_path(&path);
        url
    }

    /// URL of a single document, with the identifier percent-encoded.
    pub fn document_url(&self, identifier: &str) -> Url {
        let mut url = self.root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&format!("{identifier}.json"));
        }
        url
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JOURNAL_REMOTE_URL environment variable is required")]
    MissingRemoteUrl,

    #[error("Invalid remote URL: {0}")]
    InvalidRemoteUrl(String),

    #[error("Invalid JOURNAL_HTTP_TIMEOUT_SECS value")]
    InvalidTimeout,
}
