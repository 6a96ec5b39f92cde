//! Record output: JSON, or a short human-readable summary.

use serde::Serialize;

use liner_notes::sites::{Album, AlbumList, Artist, Credit, Lyrics};

/// Print `record` as pretty JSON, or through `human`.
pub fn emit<T: Serialize>(record: &T, json: bool, human: fn(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        human(record);
    }
    Ok(())
}

fn field(label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        println!("{label:<14} {value}");
    }
}

fn list(label: &str, values: &[String]) {
    if !values.is_empty() {
        println!("{label:<14} {}", values.join(", "));
    }
}

fn names(credits: &[Credit]) -> String {
    credits
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn years(from: u32, to: u32) -> Option<String> {
    match (from, to) {
        (0, _) => None,
        (from, 0) => Some(format!("{from}–present")),
        (from, to) => Some(format!("{from}–{to}")),
    }
}

pub fn print_artist(artist: &Artist) {
    field("Name:", artist.name.as_deref());
    field("Real name:", artist.real_name.as_deref());
    field("Nationality:", artist.nationality.as_deref());
    field("Born:", artist.birthday);
    field("Birth place:", artist.birth_place.as_deref());
    field("Died:", artist.death_date);
    field("Active:", years(artist.active_years_from, artist.active_years_to));
    list("Occupations:", &artist.occupations);
    list("Genres:", &artist.genres);
    list("Instruments:", &artist.instruments);
    field("Website:", artist.website_url.as_deref());
    field("Photo:", artist.photo_url.as_deref());
}

pub fn print_album(album: &Album) {
    field("Title:", album.title.as_deref());
    field("Year:", (album.year > 0).then_some(album.year));
    field("Released:", album.release_date);
    field("Cover:", album.cover_url.as_deref());

    if album.tracks.is_empty() {
        println!("\nNo tracks found.");
        return;
    }

    println!();
    for track in album.tracks.items() {
        let title = track.title.as_deref().unwrap_or("?");
        let length = match track.length_seconds {
            0 => String::new(),
            secs => format!(" ({}:{:02})", secs / 60, secs % 60),
        };
        let bonus = if track.bonus { " [bonus]" } else { "" };
        println!("{:>3}. {title}{length}{bonus}", track.number);

        if !track.featured_artists.is_empty() {
            println!("     featuring {}", track.featured_artists.join(", "));
        }
        for (role, credits) in [
            ("writers", &track.writers),
            ("producers", &track.producers),
            ("composers", &track.composers),
            ("arrangers", &track.arrangers),
        ] {
            if !credits.is_empty() {
                println!("     {role}: {}", names(credits));
            }
        }
    }
}

pub fn print_album_list(list: &AlbumList) {
    if list.entries.is_empty() {
        println!("No albums found.");
    }
    for entry in list.entries.items() {
        match entry.year {
            0 => println!("       {}", entry.name),
            year => println!("{year:>6} {}", entry.name),
        }
    }
    field("\nDiscography:", list.discography_url.as_deref());
}

pub fn print_lyrics(lyrics: &Lyrics) {
    match lyrics.content.as_deref() {
        Some(content) => println!("{content}\n"),
        None => println!("No lyrics found.\n"),
    }
    list("Songwriters:", &lyrics.songwriters);
    field("Copyright:", lyrics.copyright_text.as_deref());
    field("Source:", lyrics.source_title.as_deref());
    field("Source URL:", lyrics.source_url.as_deref());
}
