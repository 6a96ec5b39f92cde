//! An artist's albums.
//!
//! Artist articles list albums under a discography heading, one list item
//! per album, usually `Title (year)`. Prolific artists instead have a
//! separate discography article with one `h3` section per album; its URL is
//! reported in [`AlbumList::discography_url`] and read with
//! [`extract_discography`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::{article_path, path_to_url, WIKI_PATH};
use crate::cursor::Cursor;
use crate::dictionary::tables::SECTIONS;
use crate::dictionary::{matches_label, SectionField};
use crate::document::{Document, Language};
use crate::resolver::dom;
use crate::sites::domain::{AlbumList, AlbumListEntry};
use crate::text;

static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").expect("valid h2 selector"));

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

static WIKI_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/wiki/"]"#).expect("valid wiki link selector"));

static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid list item selector"));

static ALBUM_HEADLINES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        ".mw-parser-output > h3 .mw-headline[id], .mw-parser-output > .mw-heading3 > h3[id]",
    )
    .expect("valid headline selector")
});

/// `(1973) Queen`, `Queen (1973)`, `Queen (live) (1979, EMI)`.
static LIST_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\(?([0-9]+)\)? *)?([^\(\)]+)( *\([^0-9]+\))? *(\(([0-9]+).*\))?$")
        .expect("valid list entry pattern")
});

/// `Title (1973)`, `Title [1] (1973, EMI)`.
static HEADLINE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\(\[]+).*\(([0-9]+).*\)").expect("valid headline entry pattern")
});

/// Albums listed on an artist article.
pub fn extract(doc: &Document) -> AlbumList {
    let language = doc.language();
    let list = AlbumList {
        entries: Cursor::new(read_section_list(doc, language)),
        discography_url: discography_link(doc, language),
    };

    tracing::debug!(
        albums = list.entries.len(),
        discography = ?list.discography_url,
        url = doc.url(),
        "Album list extracted"
    );
    list
}

/// Albums of a discography article, each pointing at its own section.
pub fn extract_discography(doc: &Document) -> AlbumList {
    let entries: Vec<AlbumListEntry> = doc
        .html()
        .select(&ALBUM_HEADLINES)
        .filter_map(|headline| headline_entry(doc, headline))
        .collect();

    tracing::debug!(albums = entries.len(), url = doc.url(), "Discography extracted");
    AlbumList {
        entries: Cursor::new(entries),
        discography_url: None,
    }
}

fn read_section_list(doc: &Document, language: &Language) -> Vec<AlbumListEntry> {
    let keywords = SECTIONS.lookup(language, SectionField::DiscographyHeading);
    let Some(heading) = doc.html().select(&H2).find(|h2| heading_matches(*h2, keywords)) else {
        tracing::error!(?keywords, url = doc.url(), "Discography section not found");
        return Vec::new();
    };

    let Some(list) = section_list(heading) else {
        tracing::error!(url = doc.url(), "Album list not found under the discography heading");
        return Vec::new();
    };

    list.select(&LIST_ITEM)
        .filter_map(|item| list_entry(item, language))
        .collect()
}

fn heading_matches(h2: ElementRef<'_>, keywords: &[&str]) -> bool {
    dom::direct_text(h2).any(|t| matches_label(t, keywords))
        || dom::child_elements(h2, "span")
            .any(|span| dom::direct_text(span).any(|t| matches_label(t, keywords)))
}

/// First list after the heading. Headings wrapped in a `.mw-heading` div
/// have the list after the wrapper instead.
fn section_list(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut siblings = dom::following_elements(heading);
    if let Some(wrapper) = dom::parent_element(heading)
        && wrapper
            .value()
            .classes()
            .any(|class| class == "mw-heading")
    {
        siblings.extend(dom::following_elements(wrapper));
    }

    siblings
        .into_iter()
        .find(|el| matches!(el.value().name(), "ul" | "ol"))
}

fn list_entry(item: ElementRef<'_>, language: &Language) -> Option<AlbumListEntry> {
    let item_text = text::normalize_numerals(&dom::text_of(item));
    let caps = LIST_ENTRY.captures(&item_text)?;

    let name = text::clean(caps.get(3)?.as_str());
    if name.is_empty() {
        return None;
    }
    let year = caps
        .get(6)
        .or_else(|| caps.get(2))
        .map_or(0, |m| text::leading_int(m.as_str()));
    let url = item
        .select(&LINK)
        .next()
        .and_then(article_path)
        .map(|path| path_to_url(path, language));

    Some(AlbumListEntry { url, name, year })
}

fn discography_link(doc: &Document, language: &Language) -> Option<String> {
    let keywords = SECTIONS.lookup(language, SectionField::DiscographyLink);
    let encoded: Vec<String> = keywords
        .iter()
        .map(|k| urlencoding::encode(&k.replace(' ', "_")).into_owned())
        .collect();
    if encoded.is_empty() {
        return None;
    }

    let href = doc
        .html()
        .select(&WIKI_LINK)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| encoded.iter().any(|k| href.contains(k.as_str())))?;
    Some(path_to_url(href, language))
}

fn headline_entry(doc: &Document, headline: ElementRef<'_>) -> Option<AlbumListEntry> {
    let id = headline.value().attr("id")?;
    let title = headline
        .select(&WIKI_LINK)
        .next()
        .map_or_else(|| dom::text_of(headline), dom::text_of);
    let title = text::normalize_numerals(&title);

    let (name, year) = match HEADLINE_ENTRY.captures(&title) {
        Some(caps) => (text::clean(&caps[1]), text::leading_int(&caps[2])),
        None => (text::clean(&text::strip_bracketed(&title)), 0),
    };
    if name.is_empty() {
        return None;
    }

    Some(AlbumListEntry {
        url: Some(format!("{}#{id}", doc.url())),
        name,
        year,
    })
}

/// True when `url` points at a separate discography article.
pub fn is_discography_url(url: &str, language: &Language) -> bool {
    let Some(path) = url.find(WIKI_PATH).map(|pos| &url[pos..]) else {
        return false;
    };
    SECTIONS
        .lookup(language, SectionField::DiscographyLink)
        .iter()
        .map(|k| urlencoding::encode(&k.replace(' ', "_")).into_owned())
        .any(|k| path.contains(&k))
}
