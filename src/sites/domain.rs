//! Records produced by the extractors.
//!
//! Every record is built in one pass by its extractor and not changed
//! afterwards. List-shaped records expose their items through a
//! [`Cursor`].

use serde::Serialize;

use crate::calendar::CalendarDate;
use crate::cursor::Cursor;

/// A credited person, linked to their article when the page links them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credit {
    pub name: String,
    /// Absolute article URL
    pub url: Option<String>,
}

impl Credit {
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }
}

/// Artist biography.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Stage name, or the article title
    pub name: Option<String>,
    /// Birth name
    pub real_name: Option<String>,
    pub nationality: Option<String>,
    pub birth_place: Option<String>,
    pub birthday: Option<CalendarDate>,
    pub death_date: Option<CalendarDate>,
    /// First active year, 0 when unknown
    pub active_years_from: u32,
    /// Last active year, 0 when unknown or still active
    pub active_years_to: u32,
    pub occupations: Vec<String>,
    pub genres: Vec<String>,
    pub instruments: Vec<String>,
    pub website_url: Option<String>,
    pub photo_url: Option<String>,
}

/// One track of an album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Position on the album, 1-based
    pub number: u32,
    /// Title with quotes and parenthetical annotations removed
    pub title: Option<String>,
    pub writers: Vec<Credit>,
    pub producers: Vec<Credit>,
    pub composers: Vec<Credit>,
    pub arrangers: Vec<Credit>,
    /// Artists from a `(featuring ...)` annotation
    pub featured_artists: Vec<String>,
    /// Other annotations, such as `Remix` or `Live`
    pub labels: Vec<String>,
    /// Marked as a bonus track
    pub bonus: bool,
    pub length_seconds: u32,
}

/// Album with its track list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub title: Option<String>,
    /// Release year, 0 when unknown
    pub year: u32,
    pub release_date: Option<CalendarDate>,
    pub cover_url: Option<String>,
    pub tracks: Cursor<Track>,
}

/// One album of an artist's album list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumListEntry {
    /// Album page, or discography section, URL
    pub url: Option<String>,
    pub name: String,
    /// Release year, 0 when unknown
    pub year: u32,
}

/// An artist's albums.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumList {
    pub entries: Cursor<AlbumListEntry>,
    /// Separate discography article linked from the page, if any
    pub discography_url: Option<String>,
}

impl AlbumList {
    /// Append the entries of another list, typically the discography
    /// article's. The cursor is reset to the first entry.
    pub fn merge(&mut self, other: AlbumList) {
        let mut entries = std::mem::take(&mut self.entries).into_items();
        entries.extend(other.entries.into_items());
        self.entries = Cursor::new(entries);
    }
}

/// Lyrics with their attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyrics {
    pub content: Option<String>,
    pub source_title: Option<String>,
    pub source_url: Option<String>,
    pub songwriters: Vec<String>,
    pub copyright_text: Option<String>,
}
