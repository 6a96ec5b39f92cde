//! Document source: turns a request into a parsed [`Document`].
//!
//! A request is either a site URL or a plain query that the site turns into
//! a URL. In live mode every load is a fetch. In cached mode a snapshot is
//! read when present; otherwise the page is fetched and the snapshot
//! written before the document is handed out.

pub mod cache;
pub mod fetcher;
pub mod url;

use std::path::PathBuf;

use crate::document::{Document, Language};
use crate::error::{Error, Result};

pub use cache::SnapshotCache;
pub use fetcher::{HttpFetcher, PageFetcher};

/// Failures producing a page body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// A fetched page could not be stored as a snapshot
    #[error("Could not write snapshot {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The URL has no part usable as a snapshot name
    #[error("No snapshot key in URL {0}")]
    NoCacheKey(String),
}

impl FetchError {
    pub fn network(url: &str, error: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// A public site the extractors know the layout of.
pub trait Site {
    /// Short name, also the snapshot directory name.
    fn code_name(&self) -> &'static str;

    /// True if `url` belongs to this site.
    fn matches_url(&self, url: &str) -> bool;

    /// Build the page URL for a plain query.
    fn make_url(&self, query: &str, language: &Language) -> String;

    /// Language of the page at `url`.
    fn url_language(&self, url: &str) -> Language;

    /// The part of `url` identifying the page, still encoded.
    fn url_query<'u>(&self, url: &'u str) -> Option<&'u str>;
}

/// What to load: a site URL, or a query the site turns into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Url(String),
    Query { text: String, language: Language },
}

impl Request {
    /// Interpret user input. `http(s)` URLs are taken as URLs, anything
    /// else as a query in `language` (English when not given).
    pub fn parse(input: &str, language: Option<Language>) -> Self {
        let input = input.trim();
        if url::is_http(input) {
            Self::Url(input.to_string())
        } else {
            Self::Query {
                text: input.to_string(),
                language: language.unwrap_or_default(),
            }
        }
    }

    /// Resolve against `site`.
    pub fn locate(&self, site: &dyn Site) -> Result<Location> {
        match self {
            Self::Url(raw) => {
                if !site.matches_url(raw) {
                    return Err(Error::foreign_url(raw, site.code_name()));
                }
                let url = match site.url_query(raw) {
                    Some(query) => url::encode_url_query(raw, query),
                    None => raw.clone(),
                };
                Ok(Location {
                    language: site.url_language(&url),
                    fragment: url::fragment(&url).map(str::to_string),
                    url,
                })
            }
            Self::Query { text, language } => Ok(Location {
                url: site.make_url(text, language),
                language: language.clone(),
                fragment: None,
            }),
        }
    }
}

/// A resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Encoded page URL, fragment included
    pub url: String,
    pub language: Language,
    pub fragment: Option<String>,
}

impl Location {
    /// Snapshot name: the decoded query part of the URL.
    pub fn cache_key(&self, site: &dyn Site) -> Option<String> {
        let query = site.url_query(&self.url)?;
        let key = url::decode(query).into_owned();
        (!key.is_empty()).then_some(key)
    }
}

/// Loads documents live or through the snapshot cache.
pub struct DocumentSource<F> {
    fetcher: F,
    cache: Option<SnapshotCache>,
}

impl<F: PageFetcher> DocumentSource<F> {
    /// Every load fetches.
    pub fn live(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: None,
        }
    }

    /// Loads prefer snapshots and write one after each fetch.
    pub fn cached(fetcher: F, cache: SnapshotCache) -> Self {
        Self {
            fetcher,
            cache: Some(cache),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Load and parse the page a request points at.
    pub async fn load(&self, site: &dyn Site, request: &Request) -> Result<Document> {
        let location = request.locate(site)?;
        tracing::info!(
            site = site.code_name(),
            url = %url::decode(&location.url),
            lang = %location.language,
            cached = self.is_cached(),
            "Loading page"
        );

        let body = self.body(site, &location).await?;
        let doc = Document::parse(&body, url::strip_fragment(&location.url), location.language)
            .with_fragment(location.fragment);
        Ok(doc)
    }

    async fn body(&self, site: &dyn Site, location: &Location) -> Result<String> {
        let Some(cache) = &self.cache else {
            return Ok(self.fetcher.fetch(&location.url).await?);
        };

        let key = location
            .cache_key(site)
            .ok_or_else(|| FetchError::NoCacheKey(location.url.clone()))?;

        if let Some(body) = cache.get(site.code_name(), &key) {
            return Ok(body);
        }

        tracing::info!(key = %key, "Snapshot missing, fetching");
        let body = self.fetcher.fetch(&location.url).await?;
        let path = cache
            .put(site.code_name(), &key, &body)
            .map_err(|source| FetchError::CacheWrite {
                path: cache.path(site.code_name(), &key),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Snapshot written");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::fetcher::mocks::MockFetcher;
    use super::*;
    use crate::sites::google::Google;
    use crate::sites::wikipedia::Wikipedia;
    use tempfile::TempDir;

    const PAGE: &str = "<html><body><h1 id=\"firstHeading\">Queen</h1></body></html>";

    #[test]
    fn test_parse_request() {
        assert_eq!(
            Request::parse(" https://en.wikipedia.org/wiki/Queen ", None),
            Request::Url("https://en.wikipedia.org/wiki/Queen".into())
        );
        assert_eq!(
            Request::parse("Queen", Some(Language::new("fa"))),
            Request::Query {
                text: "Queen".into(),
                language: Language::new("fa")
            }
        );
    }

    #[test]
    fn test_locate_url_encodes_and_detects_language() {
        let request = Request::Url("https://fa.wikipedia.org/wiki/گوگوش#آلبوم".into());
        let location = request.locate(&Wikipedia).unwrap();

        assert_eq!(location.language, Language::new("fa"));
        assert_eq!(location.fragment.as_deref(), Some("آلبوم"));
        assert!(location.url.starts_with("https://fa.wikipedia.org/wiki/%DA%AF"));
        assert_eq!(location.cache_key(&Wikipedia).as_deref(), Some("گوگوش"));
    }

    #[test]
    fn test_locate_rejects_foreign_url() {
        let request = Request::Url("https://www.google.com/search?q=queen".into());
        let err = request.locate(&Wikipedia).unwrap_err();
        assert!(matches!(err, Error::ForeignUrl { site: "wikipedia", .. }));
    }

    #[test]
    fn test_locate_query() {
        let request = Request::parse("Bohemian Rhapsody", None);
        let location = request.locate(&Wikipedia).unwrap();
        assert_eq!(location.url, "https://en.wikipedia.org/wiki/Bohemian_Rhapsody");
        assert_eq!(location.cache_key(&Wikipedia).as_deref(), Some("Bohemian_Rhapsody"));
    }

    #[tokio::test]
    async fn test_live_mode_fetches() {
        let fetcher = MockFetcher::default().with_page("https://en.wikipedia.org/wiki/Queen", PAGE);
        let source = DocumentSource::live(fetcher);

        let doc = source
            .load(&Wikipedia, &Request::parse("Queen", None))
            .await
            .unwrap();
        assert_eq!(doc.url(), "https://en.wikipedia.org/wiki/Queen");
        assert_eq!(doc.language(), &Language::english());
    }

    #[tokio::test]
    async fn test_live_mode_fails_on_status() {
        let fetcher = MockFetcher::default().with_status("https://en.wikipedia.org/wiki/Queen", 500);
        let source = DocumentSource::live(fetcher);

        let err = source
            .load(&Wikipedia, &Request::parse("Queen", None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_cached_mode_fetches_once_and_persists() {
        let temp = TempDir::new().unwrap();
        let fetcher = MockFetcher::default().with_page("https://en.wikipedia.org/wiki/Queen", PAGE);
        let source = DocumentSource::cached(fetcher, SnapshotCache::new(temp.path()));
        let request = Request::parse("Queen", None);

        source.load(&Wikipedia, &request).await.unwrap();
        source.load(&Wikipedia, &request).await.unwrap();

        assert_eq!(source.fetcher.call_count(), 1);
        assert!(temp.path().join("wikipedia").join("Queen.html").exists());
    }

    #[tokio::test]
    async fn test_cached_mode_reads_existing_snapshot() {
        let temp = TempDir::new().unwrap();
        let cache = SnapshotCache::new(temp.path());
        cache.put("google", "queen album tracks", PAGE).unwrap();

        let source = DocumentSource::cached(MockFetcher::default(), cache);
        let doc = source
            .load(&Google::ALBUM, &Request::Url("https://www.google.com/search?q=queen+album+tracks".into()))
            .await
            .unwrap();

        assert_eq!(source.fetcher.call_count(), 0);
        assert_eq!(doc.language(), &Language::english());
    }

    #[tokio::test]
    async fn test_cached_mode_miss_with_failed_fetch_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = DocumentSource::cached(MockFetcher::default(), SnapshotCache::new(temp.path()));

        let result = source.load(&Wikipedia, &Request::parse("Nobody", None)).await;
        assert!(result.is_err());
        assert!(!temp.path().join("wikipedia").join("Nobody.html").exists());
    }

    #[tokio::test]
    async fn test_cached_mode_write_failure_is_an_error() {
        let temp = TempDir::new().unwrap();
        // A file where the cache directory should be
        let blocked = temp.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();

        let fetcher = MockFetcher::default().with_page("https://en.wikipedia.org/wiki/Queen", PAGE);
        let source = DocumentSource::cached(fetcher, SnapshotCache::new(&blocked));

        let err = source
            .load(&Wikipedia, &Request::parse("Queen", None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::CacheWrite { .. })));
    }
}
