//! Parsed pages handed to the extractors.

use std::fmt;

use scraper::Html;
use serde::Serialize;

/// A lowercase language code such as `en` or `fa`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Language(String);

impl Language {
    pub const ENGLISH: &'static str = "en";
    pub const PERSIAN: &'static str = "fa";
    pub const TURKISH: &'static str = "tr";

    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn english() -> Self {
        Self::new(Self::ENGLISH)
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Languages whose pages write dates in the Solar Hijri calendar.
    pub fn is_solar_hijri(&self) -> bool {
        self.0 == Self::PERSIAN
    }

    pub fn is(&self, code: &str) -> bool {
        self.0 == code
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fetched page, parsed.
///
/// Immutable once built; extractors only ever borrow it.
pub struct Document {
    html: Html,
    url: String,
    language: Language,
    fragment: Option<String>,
}

impl Document {
    /// Parse a page body.
    pub fn parse(body: &str, url: impl Into<String>, language: Language) -> Self {
        Self {
            html: Html::parse_document(body),
            url: url.into(),
            language,
            fragment: None,
        }
    }

    /// Attach the fragment identifier the page was requested with.
    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.fragment = fragment.filter(|f| !f.is_empty());
        self
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Source URL without the fragment.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("language", &self.language)
            .field("fragment", &self.fragment)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_normalized() {
        let lang = Language::new(" FA ");
        assert_eq!(lang.code(), "fa");
        assert!(lang.is_solar_hijri());
        assert!(!Language::english().is_solar_hijri());
    }

    #[test]
    fn test_empty_fragment_is_dropped() {
        let doc = Document::parse("<p>x</p>", "https://en.wikipedia.org/wiki/X", Language::english())
            .with_fragment(Some(String::new()));
        assert_eq!(doc.fragment(), None);
    }
}
