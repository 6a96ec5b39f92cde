//! Date resolution for free-text infobox values.
//!
//! Infobox dates come in several shapes depending on the article's language
//! and editor habits. [`resolve_date`] recognizes the ones seen in practice
//! and always answers with a Gregorian [`CalendarDate`]; the source calendar
//! is not kept.
//!
//! Supported shapes, tried in this order for Gregorian languages:
//! 1. ISO `1958-08-02` (often hidden in a microformat span, but reliable)
//! 2. American `May 5, 1989`
//! 3. British `8 September 1971`
//!
//! Solar Hijri languages (Persian) use `۵ اردیبهشت ۱۳۵۲`.

pub mod solar_hijri;

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};

use crate::document::Language;
use crate::text;

/// A validated Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Build a date, rejecting impossible triples such as February 30.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// The same date as a `chrono` value.
    pub fn to_naive(self) -> NaiveDate {
        // Only constructed through validated paths
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A Gregorian date pattern and which capture group holds each part.
struct DatePattern {
    name: &'static str,
    regex: Regex,
    year: usize,
    month: usize,
    day: usize,
}

static GREGORIAN_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    vec![
        DatePattern {
            name: "iso",
            regex: Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("valid iso pattern"),
            year: 1,
            month: 2,
            day: 3,
        },
        DatePattern {
            name: "american",
            regex: Regex::new(r"(\p{Lu}\p{Ll}+) ([0-9]{1,2}), ([0-9]{4})")
                .expect("valid american pattern"),
            year: 3,
            month: 1,
            day: 2,
        },
        DatePattern {
            name: "british",
            regex: Regex::new(r"([0-9]{1,2}) (\p{L}+) ([0-9]{4})").expect("valid british pattern"),
            year: 3,
            month: 2,
            day: 1,
        },
    ]
});

static SOLAR_HIJRI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}) ([^a-zA-Z0-9 ]+) ([0-9]{4})").expect("valid solar hijri pattern")
});

const ENGLISH_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const TURKISH_MONTHS: [&str; 12] = [
    "ocak", "şubat", "mart", "nisan", "mayıs", "haziran", "temmuz", "ağustos", "eylül", "ekim",
    "kasım", "aralık",
];

/// Resolve a free-text date in the conventions of `language`.
///
/// Returns `None`, with a warning, when no supported shape matches or the
/// matched triple is not a real date. Partial dates (year only, month and
/// year) are never produced.
pub fn resolve_date(text: &str, language: &Language) -> Option<CalendarDate> {
    let text = text::normalize_numerals(&text::normalize_html_spaces(text));

    if language.is_solar_hijri() {
        return resolve_solar_hijri(&text);
    }

    for pattern in GREGORIAN_PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(&text) else {
            continue;
        };
        tracing::debug!(date = &caps[0], pattern = pattern.name, "Date matched");

        let date = build_date(&caps, pattern, language);
        if date.is_none() {
            tracing::warn!(date = &caps[0], pattern = pattern.name, "Matched date is not valid");
        }
        return date;
    }

    tracing::warn!(content = %text, "Date not matched");
    None
}

fn build_date(caps: &Captures<'_>, pattern: &DatePattern, language: &Language) -> Option<CalendarDate> {
    let year = caps[pattern.year].parse().ok()?;
    let month = month_number(&caps[pattern.month], language)?;
    let day = caps[pattern.day].parse().ok()?;
    CalendarDate::new(year, month, day)
}

fn resolve_solar_hijri(text: &str) -> Option<CalendarDate> {
    let Some(caps) = SOLAR_HIJRI_PATTERN.captures(text) else {
        tracing::warn!(content = %text, "Solar Hijri date not matched");
        return None;
    };

    let year: i32 = caps[3].parse().ok()?;
    let day: u32 = caps[1].parse().ok()?;
    let month = caps[2]
        .parse()
        .ok()
        .or_else(|| solar_hijri::month_number(&caps[2]))?;

    let date = solar_hijri::to_gregorian(year, month, day).map(CalendarDate::from);
    if date.is_none() {
        tracing::warn!(date = &caps[0], "Solar Hijri date is not valid");
    }
    date
}

/// Month number for a numeric token or a month name.
///
/// Names are looked up in the document language first, then in English
/// (full names and three-letter abbreviations), ignoring case.
pub fn month_number(token: &str, language: &Language) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let token = token.to_lowercase();
    let position = |names: &[&str]| {
        names
            .iter()
            .position(|m| *m == token)
            .and_then(|i| u32::try_from(i + 1).ok())
    };

    let local = match language.code() {
        "tr" => position(&TURKISH_MONTHS),
        "fa" => solar_hijri::month_number(&token),
        _ => None,
    };

    local.or_else(|| position(&ENGLISH_MONTHS)).or_else(|| {
        ENGLISH_MONTHS
            .iter()
            .position(|m| token.len() == 3 && m.starts_with(token.as_str()))
            .and_then(|i| u32::try_from(i + 1).ok())
    })
}

/// Convert `H:M:S`, `M:S` or `S` to seconds, 0 when the shape is invalid.
pub fn time_to_seconds(time: &str) -> u32 {
    let time = text::normalize_numerals(time);
    let pieces: Vec<&str> = time.trim().split(':').collect();
    if pieces.len() > 3 {
        return 0;
    }

    pieces
        .iter()
        .fold(0, |total, piece| total * 60 + text::leading_int(piece))
}
