//! Lyrics and their attribution from the lyrics panel.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::find_by_text;
use crate::document::Document;
use crate::resolver::dom;
use crate::sites::domain::Lyrics;
use crate::text;

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

/// Shortest text node taken for lyrics. Shorter blocks are snippets.
const MIN_LYRICS_CHARS: usize = 350;

const SOURCE: &str = "Source:";
const SONGWRITERS: &str = "Songwriters:";

/// Extract the lyrics record from `doc`.
pub fn extract(doc: &Document) -> Lyrics {
    let mut lyrics = Lyrics {
        content: read_content(doc),
        ..Default::default()
    };
    read_source(doc, &mut lyrics);
    read_copyright(doc, &mut lyrics);

    tracing::debug!(
        found = lyrics.content.is_some(),
        source = ?lyrics.source_title,
        songwriters = lyrics.songwriters.len(),
        "Lyrics extracted"
    );
    lyrics
}

/// The first `div` or `span` whose leading text is long enough.
fn read_content(doc: &Document) -> Option<String> {
    let is_long = |t: &str| t.chars().count() > MIN_LYRICS_CHARS;
    let Some(block) = doc
        .html()
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "div" | "span"))
        .find(|el| dom::direct_text(*el).next().is_some_and(is_long))
    else {
        tracing::warn!(url = doc.url(), "Lyrics text not found");
        return None;
    };

    Some(lines(block).trim().to_string())
}

fn read_source(doc: &Document, lyrics: &mut Lyrics) {
    let Some(source) = find_by_text(doc, "div", |t| t.contains(SOURCE)) else {
        tracing::warn!(url = doc.url(), "Lyrics source section not found");
        return;
    };

    let Some(link) = source.select(&LINK).next() else {
        tracing::warn!(url = doc.url(), "Lyrics source has no link");
        return;
    };

    let title = text::clean(&dom::text_of(link));
    lyrics.source_title = (!title.is_empty()).then_some(title);
    lyrics.source_url = link.value().attr("href").map(str::to_string);
}

/// `Songwriters: A / B` on the first line, the copyright notice on the
/// second. Google prefixes the notice with "<title> lyrics ", which is
/// dropped.
fn read_copyright(doc: &Document, lyrics: &mut Lyrics) {
    let Some(block) = find_by_text(doc, "div", |t| t.contains(SONGWRITERS)) else {
        tracing::warn!(url = doc.url(), "Lyrics copyright section not found");
        return;
    };

    let block = lines(block);
    let block = block.trim();
    if let Some(first) = text::line(1, block) {
        let writers = text::extract_after(SONGWRITERS, first).unwrap_or(first);
        lyrics.songwriters = writers
            .split('/')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
    }

    let Some(second) = text::line(2, block) else {
        tracing::warn!(url = doc.url(), "Copyright text not found on the second line");
        return;
    };
    let second = second.replace('©', "");
    let notice = text::extract_after(" lyrics ", &second).unwrap_or_default().trim();
    lyrics.copyright_text = (!notice.is_empty()).then(|| notice.to_string());
}

/// Element text with `<br>` turned into line breaks.
fn lines(element: ElementRef<'_>) -> String {
    dom::split_on_breaks(element).join("\n")
}
