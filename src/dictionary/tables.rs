//! Label tables for the supported page layouts.
//!
//! Labels are compared after [`crate::text::normalize_label`], so case,
//! non-breaking spaces and half spaces need no separate entries.

use std::sync::LazyLock;

use super::FieldDictionary;

/// Artist infobox rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtistField {
    BirthName,
    StageName,
    Nationality,
    Born,
    Died,
    YearsActive,
    Occupation,
    Genre,
    Instrument,
    Website,
}

/// Album infobox rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AlbumField {
    ReleaseDate,
}

/// Track list columns, plus the words that classify a title's
/// parenthetical annotations (`Featuring`, `Bonus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackColumn {
    Number,
    Title,
    Writer,
    Producer,
    Composer,
    Arranger,
    Length,
    Featuring,
    Bonus,
}

/// Article sections located by heading text or link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionField {
    /// Heading of the discography section on an artist page
    DiscographyHeading,
    /// Word found in the URL of a separate discography article
    DiscographyLink,
}

pub static ARTIST_FIELDS: LazyLock<FieldDictionary<ArtistField>> = LazyLock::new(|| {
    use ArtistField::*;

    FieldDictionary::new()
        .language(
            "en",
            &[
                (BirthName, &["Birth name"]),
                (StageName, &["Stage name"]),
                (Nationality, &["Nationality"]),
                (Born, &["Born"]),
                (Died, &["Died"]),
                (YearsActive, &["Years active"]),
                (Occupation, &["Occupation", "Occupations", "Occupation(s)"]),
                (Genre, &["Genre", "Genres", "Genre(s)"]),
                (Instrument, &["Instrument", "Instruments", "Instrument(s)"]),
                (Website, &["Website"]),
            ],
        )
        .language(
            "fa",
            &[
                (BirthName, &["نام", "نام اصلی"]),
                (StageName, &["نام مستعار"]),
                (Nationality, &["ملیت"]),
                (Born, &["تولد", "زادروز", "زاده"]),
                (Died, &["مرگ"]),
                (YearsActive, &["سال‌های فعالیت"]),
                (
                    Occupation,
                    &[
                        "پیشه", "پیشه‌ها", "پیشه(ها)", "پیشه‌(ها)", "شغل", "شغل‌ها", "شغل(ها)",
                        "شغل‌(ها)", "حرفه", "حرفه‌ها", "حرفه(ها)", "حرفه‌(ها)",
                    ],
                ),
                (Genre, &["سبک", "سبک‌ها", "سبک(ها)", "سبک‌(ها)"]),
                (Instrument, &["ساز", "سازها", "ساز(ها)", "ساز‌(ها)"]),
                (Website, &["وبگاه"]),
            ],
        )
});

pub static ALBUM_FIELDS: LazyLock<FieldDictionary<AlbumField>> = LazyLock::new(|| {
    FieldDictionary::new()
        .language("en", &[(AlbumField::ReleaseDate, &["Released", "Release date"])])
        .language("fa", &[(AlbumField::ReleaseDate, &["انتشار", "تاریخ انتشار"])])
        .language("tr", &[(AlbumField::ReleaseDate, &["Yayımlanma"])])
});

pub static TRACK_COLUMNS: LazyLock<FieldDictionary<TrackColumn>> = LazyLock::new(|| {
    use TrackColumn::*;

    FieldDictionary::new()
        .language(
            "en",
            &[
                (Number, &["#", "No.", "Track"]),
                (Title, &["Title"]),
                (Writer, &["Writer", "Writer(s)", "Songwriter", "Songwriter(s)"]),
                (Producer, &["Producer", "Producer(s)", "Music"]),
                (Composer, &["Composer"]),
                (Arranger, &[]),
                (Length, &["Length"]),
                (Featuring, &["featuring", "feat.", "with"]),
                (Bonus, &["bonus"]),
            ],
        )
        .language(
            "fa",
            &[
                (Number, &["#", "شماره", "ردیف"]),
                (Title, &["نام", "نام ترانه", "عنوان", "آهنگ"]),
                (Writer, &["ترانه‌سرا", "ترانه سرا", "سراینده", "نویسنده", "نویسنده(ها)"]),
                (Composer, &["آهنگساز", "آهنگ‌ساز", "آهنگ‌ساز(ها)"]),
                (Arranger, &["تنظیم‌کننده", "تنظیم کننده", "تنظیم"]),
                (Length, &["مدت", "زمان"]),
            ],
        )
        .language(
            "tr",
            &[
                (Number, &["#", "No."]),
                (Title, &["Şarkı", "Başlık"]),
                (Writer, &["Söz", "Söz yazar(ları)ı", "Şarkı yazar(lar)ı"]),
                (Composer, &["Müzik", "Besteci(ler)"]),
                (Length, &["Süre"]),
            ],
        )
});

pub static SECTIONS: LazyLock<FieldDictionary<SectionField>> = LazyLock::new(|| {
    use SectionField::*;

    FieldDictionary::new()
        .language(
            "en",
            &[(DiscographyHeading, &["Discography"]), (DiscographyLink, &["Discography"])],
        )
        .language(
            "fa",
            &[
                (
                    DiscographyHeading,
                    &["آلبوم‌شناسی", "ترانه‌شناسی", "آهنگ‌شناسی", "آلبوم‌ها"],
                ),
                (DiscographyLink, &["ترانه‌شناسی"]),
            ],
        )
        .language(
            "tr",
            &[(DiscographyHeading, &["Diskografi"]), (DiscographyLink, &["Discography"])],
        )
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Language;

    #[test]
    fn test_track_columns_match_headers_case_insensitively() {
        let en = Language::english();
        assert_eq!(TRACK_COLUMNS.key_for(&en, "No."), Some(TrackColumn::Number));
        assert_eq!(TRACK_COLUMNS.key_for(&en, "no."), Some(TrackColumn::Number));
        assert_eq!(TRACK_COLUMNS.key_for(&en, "Title"), Some(TrackColumn::Title));
        assert_eq!(TRACK_COLUMNS.key_for(&en, "Length"), Some(TrackColumn::Length));
    }

    #[test]
    fn test_turkish_headers_use_turkish_case() {
        let tr = Language::new("tr");
        assert_eq!(TRACK_COLUMNS.key_for(&tr, "Süre"), Some(TrackColumn::Length));
        assert_eq!(TRACK_COLUMNS.key_for(&tr, "Title"), None);
    }

    #[test]
    fn test_persian_half_space_variants() {
        let fa = Language::new("fa");
        assert_eq!(
            ARTIST_FIELDS.key_for(&fa, "سبک\u{200c}ها"),
            Some(ArtistField::Genre)
        );
        assert_eq!(
            ARTIST_FIELDS.key_for(&fa, "سبک ها"),
            Some(ArtistField::Genre)
        );
    }

    #[test]
    fn test_unknown_language_uses_english_tables() {
        let de = Language::new("de");
        assert_eq!(ARTIST_FIELDS.lookup(&de, ArtistField::Born), &["Born"]);
    }

    #[test]
    fn test_persian_has_no_featuring_words() {
        let fa = Language::new("fa");
        assert!(TRACK_COLUMNS.lookup(&fa, TrackColumn::Featuring).is_empty());
        assert!(TRACK_COLUMNS.lookup(&fa, TrackColumn::Bonus).is_empty());
    }
}
