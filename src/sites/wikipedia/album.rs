//! Album details and track list.
//!
//! An album either has its own article, read from the infobox and the
//! first track table, or only a section of a discography article. The
//! second case is addressed by the URL fragment naming the section
//! heading; the title and year then come from the heading and the track
//! table is the first one after it.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{article_title, is_wiki_path, main_image, path_to_url};
use crate::cursor::Cursor;
use crate::dictionary::tables::{ALBUM_FIELDS, TRACK_COLUMNS};
use crate::dictionary::{AlbumField, TrackColumn};
use crate::document::{Document, Language};
use crate::resolver::{dom, Infobox, Table, TableRow};
use crate::sites::domain::{Album, Credit, Track};
use crate::source::url;
use crate::text;

static TRACK_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.tracklist").expect("valid track list selector"));

static WIKITABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").expect("valid wikitable selector"));

static SECTION_HEADINGS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".mw-headline[id], h2[id], h3[id], h4[id]").expect("valid heading selector")
});

/// Years below this in a heading are not release years.
const MIN_YEAR: u32 = 1000;

/// Extract the album record from `doc`.
pub fn extract(doc: &Document) -> Album {
    let album = match doc.fragment() {
        Some(fragment) => extract_section(doc, fragment),
        None => extract_article(doc),
    };

    tracing::debug!(
        title = ?album.title,
        tracks = album.tracks.len(),
        url = doc.url(),
        "Album extracted"
    );
    album
}

fn extract_article(doc: &Document) -> Album {
    let infobox = Infobox::new(doc);
    let release_labels = ALBUM_FIELDS.lookup(doc.language(), AlbumField::ReleaseDate);

    let scope: Vec<ElementRef<'_>> = vec![doc.html().root_element()];
    Album {
        title: infobox.title().or_else(|| article_title(doc)),
        year: 0,
        release_date: infobox.read_date(release_labels),
        cover_url: main_image(doc),
        tracks: Cursor::new(read_tracks(&scope, doc.language())),
    }
}

/// Album described by a discography section.
fn extract_section(doc: &Document, fragment: &str) -> Album {
    let decoded = url::decode(fragment);
    let Some(heading) = doc.html().select(&SECTION_HEADINGS).find(|h| {
        h.value()
            .attr("id")
            .is_some_and(|id| id == fragment || id == decoded)
    }) else {
        tracing::warn!(fragment, url = doc.url(), "Section heading not found");
        return Album::default();
    };

    let mut year = 0;
    let title = text::strip_bracketed(&dom::text_of(heading));
    let title = text::extract_parenthesized_numbers(&title, |number| {
        if number > MIN_YEAR {
            year = number;
        }
    });
    let title = text::clean(&title);

    Album {
        title: (!title.is_empty()).then_some(title),
        year,
        release_date: None,
        cover_url: None,
        tracks: Cursor::new(read_tracks(&section_scope(heading), doc.language())),
    }
}

/// Elements after the heading's container, then after each of its
/// ancestors, in that order.
fn section_scope(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut scope = Vec::new();
    let mut current = dom::parent_element(heading);
    while let Some(element) = current {
        scope.extend(dom::following_elements(element));
        current = dom::parent_element(element);
    }
    scope
}

fn track_table<'a>(scope: &[ElementRef<'a>]) -> Option<ElementRef<'a>> {
    if let Some(table) = dom::select_first_in(scope, &TRACK_LIST) {
        return Some(table);
    }

    tracing::warn!("Track list table not found, trying the first wikitable");
    let table = dom::select_first_in(scope, &WIKITABLE);
    if table.is_none() {
        tracing::error!("No table found for the track list");
    }
    table
}

fn read_tracks(scope: &[ElementRef<'_>], language: &Language) -> Vec<Track> {
    let Some(table) = track_table(scope) else {
        return Vec::new();
    };

    let table = Table::new(table, &TRACK_COLUMNS, language);
    let mut tracks: Vec<Track> = Vec::new();
    for row in table.rows() {
        let track = read_track(&row, language, tracks.len());
        tracks.push(track);
    }
    tracks
}

fn read_track(row: &TableRow<'_, '_, TrackColumn>, language: &Language, previous: usize) -> Track {
    let number = row
        .cell_text(TrackColumn::Number)
        .map(|n| text::leading_int(&text::normalize_numerals(&n)))
        .filter(|n| *n > 0)
        .unwrap_or_else(|| u32::try_from(previous + 1).unwrap_or(u32::MAX));

    let mut track = Track {
        number,
        length_seconds: row
            .cell_text(TrackColumn::Length)
            .map_or(0, |length| crate::calendar::time_to_seconds(&length)),
        ..Default::default()
    };

    if let Some(title) = row.cell_text(TrackColumn::Title) {
        let title = read_title(&title, language, &mut track);
        track.title = (!title.is_empty()).then_some(title);
    }

    track.writers = read_credits(row, TrackColumn::Writer, language);
    track.producers = read_credits(row, TrackColumn::Producer, language);
    track.composers = read_credits(row, TrackColumn::Composer, language);
    track.arrangers = read_credits(row, TrackColumn::Arranger, language);
    track
}

/// Strip quotes and parenthetical annotations from a title, sorting each
/// annotation into the bonus flag, the featured artists, or the labels.
fn read_title(title: &str, language: &Language, track: &mut Track) -> String {
    let bonus_words = TRACK_COLUMNS.lookup(language, TrackColumn::Bonus);
    let featuring_words = TRACK_COLUMNS.lookup(language, TrackColumn::Featuring);

    let title = title.replace('"', "");
    let title = text::extract_parenthesized(&title, |annotation| {
        if bonus_words
            .iter()
            .any(|word| text::contains_ignore_case(annotation, &format!("{word} ")))
        {
            track.bonus = true;
            return;
        }

        let featured = featuring_words.iter().find_map(|word| {
            let artists = text::extract_after(&format!("{word} "), annotation)?.trim();
            (!artists.is_empty()).then_some(artists)
        });
        if let Some(artists) = featured {
            track.featured_artists = text::split_list(artists);
            return;
        }

        let label = annotation.trim();
        if !label.is_empty() {
            track.labels.push(label.to_string());
        }
    });
    text::normalize_spaces(&title)
}

fn read_credits(
    row: &TableRow<'_, '_, TrackColumn>,
    column: TrackColumn,
    language: &Language,
) -> Vec<Credit> {
    row.multi_item_cell(column)
        .into_iter()
        .filter_map(|item| {
            let name = text::extract_parenthesized(&text::strip_bracketed(&item.text), |_| {});
            let name = text::normalize_spaces(&name);
            if name.is_empty() {
                return None;
            }
            let url = item
                .url
                .filter(|href| is_wiki_path(href))
                .map(|href| path_to_url(&href, language));
            Some(Credit::new(name, url))
        })
        .collect()
}
