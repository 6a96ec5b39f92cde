//! Crate-wide error type. The binary wraps it in `anyhow`.
//!
//! Apart from config saves, only two things are errors: a request that
//! cannot be turned into a URL, and a page that cannot be fetched or read
//! from the snapshot cache.
//! Fields that are missing or malformed inside a fetched page are never
//! errors; extractors resolve them to `None` or an empty list and log.
//!
//! # Example
//!
//! ```ignore
//! use liner_notes::error::{Error, Result};
//!
//! async fn artist(source: &DocumentSource, url: &str) -> Result<Artist> {
//!     let request = Request::parse(url, None);
//!     let doc = source.load(&Wikipedia, &request).await?; // fetch errors auto-convert
//!     Ok(wikipedia::artist::extract(&doc))
//! }
//! ```

use crate::source::FetchError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page could not be produced by the document source
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The URL does not belong to the site it was given to
    #[error("URL {url} is not a {site} URL")]
    ForeignUrl { url: String, site: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a foreign-URL error.
    pub fn foreign_url(url: impl Into<String>, site: &'static str) -> Self {
        Self::ForeignUrl {
            url: url.into(),
            site,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
