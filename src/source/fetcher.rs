//! Page fetchers.
//!
//! [`PageFetcher`] is the seam between the document source and the network,
//! so tests can substitute [`mocks::MockFetcher`] for the real client.

use std::time::Duration;

use async_trait::async_trait;

use super::FetchError;

/// User agent sent when the configuration does not name one.
pub const USER_AGENT: &str = concat!(
    "LinerNotes/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/liner-notes)"
);

/// Fetch a page body by URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the body of a successful (2xx) response.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher backed by `reqwest`.
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given user agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url, status = status.as_u16(), "HTTP request failed");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::info!(url, "HTTP request succeeded");
        response.text().await.map_err(|e| FetchError::network(url, e))
    }
}
