//! Google search result pages.
//!
//! Google answers music queries with knowledge panels whose markup has no
//! stable class names, so the extractors anchor on visible English text
//! ("Album by ", "Songs", "Source:", "Songwriters:") and walk from there.
//! Result pages are always treated as English.

pub mod album;
pub mod lyrics;

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::document::{Document, Language};
use crate::resolver::dom;
use crate::source::{Site, url};

static SITE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(www\.)?google\.[a-z]+/").expect("valid google url pattern")
});

static URL_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/search\?q=([^&]+)").expect("valid query pattern"));

/// Google search. Plain queries are suffixed with the words that make
/// Google show the panel an extractor reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Google {
    suffix: &'static str,
}

impl Google {
    /// Searches showing an album's track panel.
    pub const ALBUM: Google = Google {
        suffix: "album tracks",
    };

    /// Searches showing a song's lyrics panel.
    pub const LYRICS: Google = Google {
        suffix: "song lyrics",
    };

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }
}

impl Site for Google {
    fn code_name(&self) -> &'static str {
        "google"
    }

    fn matches_url(&self, url: &str) -> bool {
        SITE_URL.is_match(url)
    }

    fn make_url(&self, query: &str, _language: &Language) -> String {
        let query = format!("{} {}", query.trim(), self.suffix);
        format!(
            "https://www.google.com/search?q={}",
            url::encode_query_value(query.trim())
        )
    }

    fn url_language(&self, _url: &str) -> Language {
        Language::english()
    }

    fn url_query<'u>(&self, url: &'u str) -> Option<&'u str> {
        URL_QUERY
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// First element named `name` whose leading text node satisfies `test`.
fn find_by_text<'a>(
    doc: &'a Document,
    name: &str,
    test: impl Fn(&str) -> bool,
) -> Option<ElementRef<'a>> {
    doc.html()
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == name)
        .find(|el| dom::direct_text(*el).next().is_some_and(&test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_url() {
        assert!(Google::ALBUM.matches_url("https://www.google.com/search?q=x"));
        assert!(Google::ALBUM.matches_url("http://google.co.uk/search?q=x"));
        assert!(!Google::ALBUM.matches_url("https://en.wikipedia.org/wiki/X"));
        assert!(!Google::ALBUM.matches_url("https://maps.google.com/"));
    }

    #[test]
    fn test_make_url_adds_suffix() {
        assert_eq!(
            Google::ALBUM.make_url("A Night at the Opera", &Language::new("fa")),
            "https://www.google.com/search?q=A+Night+at+the+Opera+album+tracks"
        );
        assert_eq!(
            Google::LYRICS.make_url("Bohemian Rhapsody", &Language::english()),
            "https://www.google.com/search?q=Bohemian+Rhapsody+song+lyrics"
        );
        assert_eq!(
            Google::default().make_url("queen", &Language::english()),
            "https://www.google.com/search?q=queen"
        );
    }

    #[test]
    fn test_url_query_and_language() {
        let url = "https://www.google.com/search?q=queen+album+tracks&hl=en";
        assert_eq!(Google::ALBUM.url_query(url), Some("queen+album+tracks"));
        assert_eq!(Google::ALBUM.url_language(url), Language::english());
        assert_eq!(Google::ALBUM.url_query("https://www.google.com/"), None);
    }
}
