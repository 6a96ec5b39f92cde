//! Album title and track titles from the album panel.

use std::sync::LazyLock;

use scraper::Selector;

use super::find_by_text;
use crate::cursor::Cursor;
use crate::document::Document;
use crate::resolver::dom;
use crate::sites::domain::{Album, Track};
use crate::text;

static SONG_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/search?"]"#).expect("valid song link selector"));

const ALBUM_BY: &str = "Album by ";
const SONGS: &str = "Songs";

/// Extract the album record from `doc`. Google does not give dates, cover
/// art or credits, so only the title and track titles are filled in.
pub fn extract(doc: &Document) -> Album {
    let album = Album {
        title: read_title(doc),
        tracks: Cursor::new(read_tracks(doc)),
        ..Default::default()
    };

    tracing::debug!(title = ?album.title, tracks = album.tracks.len(), "Album extracted");
    album
}

/// The panel header is a block holding the title, then the "Album by"
/// line.
fn read_title(doc: &Document) -> Option<String> {
    let Some(album_by) = find_by_text(doc, "div", |t| t.starts_with(ALBUM_BY)) else {
        tracing::error!(url = doc.url(), "Album name not found");
        return None;
    };

    let header = dom::ancestor(album_by, 2)?;
    let title = header
        .children()
        .filter_map(scraper::ElementRef::wrap)
        .nth(1)
        .map(|el| text::clean(&dom::text_of(el)))?;
    (!title.is_empty()).then_some(title)
}

fn read_tracks(doc: &Document) -> Vec<Track> {
    let Some(songs) = find_by_text(doc, "div", |t| t.trim() == SONGS) else {
        tracing::error!(url = doc.url(), "Songs title not found");
        return Vec::new();
    };
    let Some(panel) = dom::ancestor(songs, 3) else {
        tracing::error!(url = doc.url(), "Songs panel not found");
        return Vec::new();
    };

    let titles: Vec<String> = panel
        .select(&SONG_LINK)
        .map(|a| text::clean(&dom::text_of(a)))
        .filter(|title| !title.is_empty())
        .collect();
    if titles.is_empty() {
        tracing::error!(url = doc.url(), "Songs list not found");
    }

    titles
        .into_iter()
        .zip(1..)
        .map(|(title, number)| Track {
            number,
            title: Some(title),
            ..Default::default()
        })
        .collect()
}
