//! Wikipedia pages, in any language edition.
//!
//! Article paths look like `/wiki/<Title>`; the language edition is the
//! subdomain. Relative `/wiki/` links found on a page are turned into
//! absolute URLs on the page's own edition.

pub mod album;
pub mod album_list;
pub mod artist;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::document::{Document, Language};
use crate::source::{Site, url};
use crate::text;

static SITE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://[a-z]+\.wikipedia\.org/").expect("valid wikipedia url pattern")
});

static URL_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//([a-zA-Z]+)\.").expect("valid language pattern"));

static URL_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/#]+)(#.*)?$").expect("valid query pattern"));

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#firstHeading").expect("valid heading selector"));

/// Article path prefix.
pub const WIKI_PATH: &str = "/wiki/";

/// Wikipedia, any language edition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wikipedia;

impl Site for Wikipedia {
    fn code_name(&self) -> &'static str {
        "wikipedia"
    }

    fn matches_url(&self, url: &str) -> bool {
        SITE_URL.is_match(url)
    }

    fn make_url(&self, query: &str, language: &Language) -> String {
        path_to_url(&make_wiki_path(query), language)
    }

    fn url_language(&self, url: &str) -> Language {
        URL_LANGUAGE
            .captures(url)
            .map(|caps| Language::new(&caps[1]))
            .unwrap_or_default()
    }

    fn url_query<'u>(&self, url: &'u str) -> Option<&'u str> {
        URL_QUERY
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// `/wiki/<Title>` for an article title, spaces as underscores.
pub fn make_wiki_path(title: &str) -> String {
    format!("{WIKI_PATH}{}", urlencoding::encode(&title.trim().replace(' ', "_")))
}

/// True for a relative article path.
pub fn is_wiki_path(href: &str) -> bool {
    href.starts_with(WIKI_PATH)
}

/// Absolute URL of an article path on the given language edition.
pub fn path_to_url(path: &str, language: &Language) -> String {
    format!("https://{}.wikipedia.org{path}", language.code())
}

/// Original file URL for a thumbnail URL; other URLs are returned as is.
///
/// `.../commons/thumb/a/ab/X.jpg/220px-X.jpg` becomes `.../commons/a/ab/X.jpg`.
pub fn thumb_to_original(url: &str) -> String {
    if !url.contains("/thumb/") {
        return url.to_string();
    }
    let url = url.replacen("/thumb", "", 1);
    match url.rfind('/') {
        Some(pos) => url[..pos].to_string(),
        None => url,
    }
}

/// Article path of a link, `None` for red links and non-article links.
pub fn article_path(link: ElementRef<'_>) -> Option<&str> {
    let element = link.value();
    if element.attr("class") == Some("new") {
        return None;
    }
    element.attr("href").filter(|href| is_wiki_path(href))
}

/// Article title from the page heading, citations stripped.
pub fn article_title(doc: &Document) -> Option<String> {
    let heading = doc.html().select(&HEADING).next()?;
    let title = text::clean(&text::strip_bracketed(&heading.text().collect::<String>()));
    (!title.is_empty()).then_some(title)
}

/// URL of the same article in another language edition.
///
/// `None` when the page already is in `language` or has no such link.
pub fn language_link(doc: &Document, language: &Language) -> Option<String> {
    if doc.language() == language {
        return None;
    }
    let code = language.code();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return None;
    }

    let selector = Selector::parse(&format!(r#"#p-lang li a[hreflang="{code}"]"#)).ok()?;
    let href = doc.html().select(&selector).next()?.value().attr("href")?;
    url::absolutize(doc.url(), href)
}

/// Main image of the page, as the original file rather than a thumbnail.
pub fn main_image(doc: &Document) -> Option<String> {
    crate::resolver::Infobox::new(doc)
        .image()
        .map(|src| thumb_to_original(&src))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_url() {
        assert!(Wikipedia.matches_url("https://en.wikipedia.org/wiki/Queen"));
        assert!(Wikipedia.matches_url("http://FA.wikipedia.org/wiki/X"));
        assert!(!Wikipedia.matches_url("https://www.google.com/search?q=x"));
        assert!(!Wikipedia.matches_url("https://wikipedia.org/wiki/X"));
    }

    #[test]
    fn test_url_language_and_query() {
        let url = "https://tr.wikipedia.org/wiki/Tarkan#Diskografi";
        assert_eq!(Wikipedia.url_language(url), Language::new("tr"));
        assert_eq!(Wikipedia.url_query(url), Some("Tarkan"));
        assert_eq!(Wikipedia.url_language("no-language"), Language::english());
    }

    #[test]
    fn test_make_url() {
        assert_eq!(
            Wikipedia.make_url("A Night at the Opera", &Language::english()),
            "https://en.wikipedia.org/wiki/A_Night_at_the_Opera"
        );
        assert_eq!(
            Wikipedia.make_url("Queen (band)", &Language::new("de")),
            "https://de.wikipedia.org/wiki/Queen_%28band%29"
        );
    }

    #[test]
    fn test_thumb_to_original() {
        assert_eq!(
            thumb_to_original(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/a/ab/Freddie.jpg/220px-Freddie.jpg"
            ),
            "https://upload.wikimedia.org/wikipedia/commons/a/ab/Freddie.jpg"
        );
        assert_eq!(thumb_to_original("https://x.org/a.jpg"), "https://x.org/a.jpg");
    }

    #[test]
    fn test_article_path_skips_red_links() {
        let html = scraper::Html::parse_fragment(
            r#"<a href="/wiki/Queen">Queen</a><a class="new" href="/wiki/Nope">Nope</a><a href="https://x.org">x</a>"#,
        );
        let links: Vec<_> = html.select(&Selector::parse("a").unwrap()).collect();
        assert_eq!(article_path(links[0]), Some("/wiki/Queen"));
        assert_eq!(article_path(links[1]), None);
        assert_eq!(article_path(links[2]), None);
    }

    #[test]
    fn test_language_link_and_title() {
        let html = r#"<html><body>
            <h1 id="firstHeading">Googoosh<sup>[1]</sup></h1>
            <div id="p-lang"><ul><li><a hreflang="fa" href="https://fa.wikipedia.org/wiki/%DA%AF%D9%88%DA%AF%D9%88%D8%B4">فارسی</a></li></ul></div>
        </body></html>"#;
        let doc = Document::parse(html, "https://en.wikipedia.org/wiki/Googoosh", Language::english());

        assert_eq!(article_title(&doc), Some("Googoosh".into()));
        assert_eq!(
            language_link(&doc, &Language::new("fa")),
            Some("https://fa.wikipedia.org/wiki/%DA%AF%D9%88%DA%AF%D9%88%D8%B4".into())
        );
        assert_eq!(language_link(&doc, &Language::english()), None);
        assert_eq!(language_link(&doc, &Language::new("tr")), None);
    }
}
