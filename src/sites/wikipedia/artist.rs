//! Artist biography from an artist article's infobox.

use std::sync::LazyLock;

use scraper::Selector;

use super::{article_title, main_image};
use crate::dictionary::tables::ARTIST_FIELDS;
use crate::dictionary::ArtistField;
use crate::document::Document;
use crate::resolver::Infobox;
use crate::sites::domain::Artist;
use crate::text;

static BIRTHPLACE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".birthplace").expect("valid birthplace selector"));

/// Extract the artist record from `doc`.
pub fn extract(doc: &Document) -> Artist {
    let language = doc.language();
    let labels = |field| ARTIST_FIELDS.lookup(language, field);
    let infobox = Infobox::new(doc);

    let range = infobox.read_date_range(labels(ArtistField::YearsActive));
    let artist = Artist {
        name: infobox
            .read_text(labels(ArtistField::StageName))
            .or_else(|| article_title(doc)),
        real_name: real_name(doc, &infobox),
        nationality: infobox.read_text(labels(ArtistField::Nationality)),
        birth_place: birth_place(&infobox, labels(ArtistField::Born)),
        birthday: infobox.read_date(labels(ArtistField::Born)),
        death_date: infobox.read_date(labels(ArtistField::Died)),
        active_years_from: range.from,
        active_years_to: range.to,
        occupations: infobox.read_list(labels(ArtistField::Occupation)),
        genres: infobox.read_list(labels(ArtistField::Genre)),
        instruments: infobox.read_list(labels(ArtistField::Instrument)),
        website_url: infobox.read_link(labels(ArtistField::Website)),
        photo_url: main_image(doc),
    };

    tracing::debug!(name = ?artist.name, url = doc.url(), "Artist extracted");
    artist
}

/// Birth name row, else the first line of the born row, else the infobox
/// caption. Persian pages put the stage name first in the born row, so it
/// is skipped there.
fn real_name(doc: &Document, infobox: &Infobox<'_>) -> Option<String> {
    let language = doc.language();
    if let Some(name) = infobox.read_text(ARTIST_FIELDS.lookup(language, ArtistField::BirthName)) {
        return Some(name);
    }

    if !language.is_solar_hijri()
        && let Some(row) = infobox.find_row(ARTIST_FIELDS.lookup(language, ArtistField::Born))
    {
        return row.first_line();
    }

    infobox.title()
}

fn birth_place(infobox: &Infobox<'_>, labels: &[&str]) -> Option<String> {
    let row = infobox.find_row(labels)?;
    let place = match row.select_first(&BIRTHPLACE) {
        Some(element) => element.text().collect::<String>(),
        None => text::strip_bracketed(&row.last_line()?),
    };
    let place = text::clean(&place);
    (!place.is_empty()).then_some(place)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDate;
    use crate::document::Language;

    const EN_PAGE: &str = r#"<html><body>
        <h1 id="firstHeading">Freddie Mercury</h1>
        <table class="infobox">
          <tr><th colspan="2">Freddie Mercury</th></tr>
          <tr><td colspan="2"><span class="image"><img src="//upload.wikimedia.org/wikipedia/commons/thumb/e/ef/Freddie.jpg/220px-Freddie.jpg"></span></td></tr>
          <tr><th scope="row">Born</th><td>Farrokh Bulsara<br><span style="display:none">(<span class="bday">1946-09-05</span>)</span>5 September 1946<br><span class="birthplace">Stone Town, Sultanate of Zanzibar</span></td></tr>
          <tr><th scope="row">Died</th><td>24 November 1991<br>Kensington, London, England</td></tr>
          <tr><th scope="row">Occupation(s)</th><td><ul><li>Singer</li><li>songwriter</li></ul></td></tr>
          <tr><th scope="row">Years active</th><td>1969–1991</td></tr>
          <tr><th scope="row">Genres</th><td>Rock, pop and opera</td></tr>
          <tr><th scope="row">Instruments</th><td>Vocals<br>piano</td></tr>
          <tr><th scope="row">Website</th><td><a href="https://www.freddiemercury.com">freddiemercury.com</a></td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn test_english_artist() {
        let doc = Document::parse(EN_PAGE, "https://en.wikipedia.org/wiki/Freddie_Mercury", Language::english());
        let artist = extract(&doc);

        assert_eq!(artist.name.as_deref(), Some("Freddie Mercury"));
        assert_eq!(artist.real_name.as_deref(), Some("Farrokh Bulsara"));
        assert_eq!(artist.birth_place.as_deref(), Some("Stone Town, Sultanate of Zanzibar"));
        assert_eq!(artist.birthday, CalendarDate::new(1946, 9, 5));
        assert_eq!(artist.death_date, CalendarDate::new(1991, 11, 24));
        assert_eq!(artist.active_years_from, 1969);
        assert_eq!(artist.active_years_to, 1991);
        assert_eq!(artist.occupations, vec!["Singer", "songwriter"]);
        assert_eq!(artist.genres, vec!["Rock", "pop", "opera"]);
        assert_eq!(artist.instruments, vec!["Vocals", "piano"]);
        assert_eq!(artist.website_url.as_deref(), Some("https://www.freddiemercury.com"));
        assert_eq!(
            artist.photo_url.as_deref(),
            Some("https://upload.wikimedia.org/wikipedia/commons/e/ef/Freddie.jpg")
        );
        assert_eq!(artist.nationality, None);
    }

    #[test]
    fn test_persian_artist() {
        let page = r#"<html><body>
            <h1 id="firstHeading">گوگوش</h1>
            <table class="infobox">
              <tr><th colspan="2">گوگوش</th></tr>
              <tr><th scope="row">نام اصلی</th><td>فائقه آتشین</td></tr>
              <tr><th scope="row">زاده</th><td>۲۲ بهمن ۱۳۵۷<br>تهران، ایران</td></tr>
              <tr><th scope="row">سبک‌ها</th><td>پاپ، پاپ ایرانی</td></tr>
              <tr><th scope="row">سال‌های فعالیت</th><td>۱۳۳۲ تا کنون</td></tr>
            </table>
        </body></html>"#;
        let doc = Document::parse(page, "https://fa.wikipedia.org/wiki/X", Language::new("fa"));
        let artist = extract(&doc);

        assert_eq!(artist.name.as_deref(), Some("گوگوش"));
        assert_eq!(artist.real_name.as_deref(), Some("فائقه آتشین"));
        assert_eq!(artist.birthday, CalendarDate::new(1979, 2, 11));
        assert_eq!(artist.birth_place.as_deref(), Some("تهران، ایران"));
        assert_eq!(artist.genres, vec!["پاپ", "پاپ ایرانی"]);
        assert_eq!(artist.active_years_from, 1332);
        assert_eq!(artist.active_years_to, 0);
    }

    #[test]
    fn test_page_without_infobox() {
        let doc = Document::parse(
            r#"<html><body><h1 id="firstHeading">Someone</h1></body></html>"#,
            "https://en.wikipedia.org/wiki/Someone",
            Language::english(),
        );
        let artist = extract(&doc);

        assert_eq!(artist.name.as_deref(), Some("Someone"));
        assert_eq!(artist.real_name, None);
        assert!(artist.genres.is_empty());
        assert_eq!(artist.birthday, None);
        assert_eq!(artist.active_years_from, 0);
    }
}
