//! HTTP transport backed by reqwest.

use super::{RemoteTransport, TransportError, TransportResult};
use reqwest::{header::CONTENT_TYPE, Client, Response, Url};
use std::time::Duration;

/// HTTP-based transport for the remote document store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client })
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Turn a non-success status into an error, keeping the response body as context.
async fn check(response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(%status, error = %err, "Failed to read error response body");
            String::new()
        }
    };
    let message = if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };

    Err(TransportError::status(status.as_u16(), message))
}

impl RemoteTransport for HttpTransport {
    async fn get(&self, url: &Url) -> TransportResult<Vec<u8>> {
        tracing::debug!(%url, "GET");
        let response = check(self.client.get(url.clone()).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn put(&self, url: &Url, body: Vec<u8>) -> TransportResult<()> {
        tracing::debug!(%url, bytes = body.len(), "PUT");
        let request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        check(request.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, url: &Url) -> TransportResult<()> {
        tracing::debug!(%url, "DELETE");
        check(self.client.delete(url.clone()).send().await?).await?;
        Ok(())
    }
}
