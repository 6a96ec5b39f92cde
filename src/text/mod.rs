//! Text normalization helpers.
//!
//! Every function here is pure and total: degenerate input yields an empty
//! or unchanged result, never an error. Source pages mix Latin, Persian and
//! Arabic script, two sets of Eastern digits, non-breaking spaces and
//! wiki citation markers, and these helpers flatten that variety before any
//! comparison or parsing happens.

use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid bracket pattern"));

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("valid parenthesis pattern"));

static PARENTHESIZED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+)\)").expect("valid number pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Non-breaking space as it comes out of `&nbsp;`.
pub const NBSP: char = '\u{a0}';

/// Persian zero-width non-joiner ("half space").
pub const ZWNJ: char = '\u{200c}';

/// List delimiters in priority order, with the conjunction word that may
/// join the last two elements of a list using that delimiter.
const DELIMITERS: [(char, Option<&str>); 3] = [
    (',', Some(" and ")),
    ('،', Some(" و ")),
    ('·', None),
];

/// Map Arabic-Indic and Extended Arabic-Indic digits to ASCII digits.
pub fn normalize_numerals(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => digit(c as u32 - 0x0660),
            '\u{06F0}'..='\u{06F9}' => digit(c as u32 - 0x06F0),
            _ => c,
        })
        .collect()
}

fn digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('0')
}

/// Remove `[...]` citation markers.
pub fn strip_bracketed(text: &str) -> String {
    BRACKETED.replace_all(text, "").into_owned()
}

/// Remove `(...)` spans, reporting the inner text of each one in order.
///
/// Surrounding whitespace is left as it was; callers trim when they need to.
pub fn extract_parenthesized(text: &str, mut on_each: impl FnMut(&str)) -> String {
    for caps in PARENTHESIZED.captures_iter(text) {
        on_each(&caps[1]);
    }
    PARENTHESIZED.replace_all(text, "").into_owned()
}

/// Remove `(digits)` spans, reporting each number.
///
/// Numerals are normalized first, so `(۱۳۷۵)` is reported as 1375 and the
/// returned text carries ASCII digits.
pub fn extract_parenthesized_numbers(text: &str, mut on_each: impl FnMut(u32)) -> String {
    let text = normalize_numerals(text);
    for caps in PARENTHESIZED_NUMBER.captures_iter(&text) {
        if let Ok(number) = caps[1].parse() {
            on_each(number);
        }
    }
    PARENTHESIZED_NUMBER.replace_all(&text, "").into_owned()
}

/// Split a flat, human-written list into its elements.
///
/// The first delimiter present wins. Comma-style delimiters also split the
/// last element on their conjunction, so `"A, B and C"` gives three
/// elements. Without any delimiter a bare conjunction still splits
/// (`"A and B"`). Elements are trimmed and empty ones dropped.
pub fn split_list(text: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some((delimiter, word)) = DELIMITERS.iter().find(|(d, _)| text.contains(*d)) {
        parts = text.split(*delimiter).map(str::to_string).collect();
        if let Some(word) = word
            && let Some(last) = parts.pop()
        {
            parts.extend(last.split(word).map(str::to_string));
        }
    } else if let Some(word) = DELIMITERS
        .iter()
        .filter_map(|(_, w)| *w)
        .find(|w| text.contains(w))
    {
        parts = text.split(word).map(str::to_string).collect();
    } else {
        parts.push(text.to_string());
    }

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Unify Arabic Kaf/Yeh with their Persian forms.
pub fn normalize_script(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    text.chars()
        .map(|c| match c {
            'ك' => 'ک',
            'ي' => 'ی',
            _ => c,
        })
        .collect()
}

/// Replace non-breaking spaces with plain spaces.
pub fn normalize_html_spaces(text: &str) -> String {
    text.replace(NBSP, " ")
}

/// Collapse every whitespace run (including NBSP) into one space and trim.
pub fn normalize_spaces(text: &str) -> String {
    WHITESPACE
        .replace_all(&normalize_html_spaces(text), " ")
        .trim()
        .to_string()
}

/// Canonical form used when comparing a document label to dictionary labels.
pub fn normalize_label(text: &str) -> String {
    normalize_spaces(&normalize_script(text).replace(ZWNJ, " ")).to_lowercase()
}

/// Script and whitespace normalization in one step.
pub fn clean(text: &str) -> String {
    normalize_spaces(&normalize_script(text))
}

/// Return the `n`th line (1-based) of `text`.
///
/// Carriage returns count as line breaks and blank lines are skipped over;
/// `n < 1` is treated as the first line.
pub fn line(n: usize, text: &str) -> Option<&str> {
    let n = n.max(1);
    text.split(['\r', '\n'])
        .filter(|l| !l.is_empty())
        .nth(n - 1)
}

/// Return the part of `text` after the first `needle`, or `None` if absent.
pub fn extract_after<'a>(needle: &str, text: &'a str) -> Option<&'a str> {
    text.find(needle).map(|pos| &text[pos + needle.len()..])
}

/// Parse the integer prefix of `text` after leading whitespace, 0 if none.
///
/// `"1964 "` gives 1964, `"3."` gives 3, `"present"` gives 0.
pub fn leading_int(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().unwrap_or(0)
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_numerals() {
        assert_eq!(normalize_numerals("٠١٢٣٤"), "01234");
        assert_eq!(normalize_numerals("۰۱۲۳۴"), "01234");
        assert_eq!(normalize_numerals("Track 12"), "Track 12");
        assert_eq!(
            normalize_numerals("۰ ۱ ۲ ۳ ۴ ۵ ۶ ۷ ۸ ۹"),
            "0 1 2 3 4 5 6 7 8 9"
        );
        assert_eq!(normalize_numerals("٢٣ خرداد ۱۳۲۵"), "23 خرداد 1325");
    }

    #[test]
    fn test_strip_bracketed() {
        assert_eq!(strip_bracketed("Pop[1][note 2] rock"), "Pop rock");
        assert_eq!(strip_bracketed("no citations"), "no citations");
    }

    #[test]
    fn test_extract_parenthesized_reports_each_span() {
        let mut seen = Vec::new();
        let out = extract_parenthesized("Song (feat. X) (Remix)", |s| seen.push(s.to_string()));
        assert_eq!(seen, vec!["feat. X", "Remix"]);
        assert_eq!(out, "Song  ");
    }

    #[test]
    fn test_extract_parenthesized_without_spans() {
        let mut calls = 0;
        let out = extract_parenthesized("Plain title", |_| calls += 1);
        assert_eq!(out, "Plain title");
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_extract_parenthesized_numbers() {
        let mut years = Vec::new();
        let out = extract_parenthesized_numbers("Album (۱۳۷۵) (Deluxe)", |n| years.push(n));
        assert_eq!(years, vec![1375]);
        assert_eq!(out, "Album  (Deluxe)");
    }

    #[test]
    fn test_split_list_comma_with_conjunction() {
        assert_eq!(split_list("A, B and C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_split_list_single() {
        assert_eq!(split_list("A"), vec!["A"]);
    }

    #[test]
    fn test_split_list_arabic_comma() {
        assert_eq!(split_list("پاپ، راک و جاز"), vec!["پاپ", "راک", "جاز"]);
    }

    #[test]
    fn test_split_list_middle_dot_has_no_conjunction() {
        assert_eq!(split_list("Rock · Blues and Soul"), vec!["Rock", "Blues and Soul"]);
    }

    #[test]
    fn test_split_list_bare_conjunction() {
        assert_eq!(split_list("Singer and songwriter"), vec!["Singer", "songwriter"]);
    }

    #[test]
    fn test_split_list_drops_empty_elements() {
        assert_eq!(split_list("A, B, and C"), vec!["A", "B", "C"]);
        assert!(split_list("   ").is_empty());
    }

    #[test]
    fn test_normalize_script() {
        assert_eq!(normalize_script("كيهان"), "کیهان");
        assert_eq!(normalize_script("ascii"), "ascii");
    }

    #[test]
    fn test_normalize_html_spaces() {
        assert_eq!(normalize_html_spaces("Years\u{a0}active"), "Years active");
        assert_eq!(normalize_html_spaces("واژه فارسی"), "واژه فارسی");
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Years\u{a0}Active \n"), "years active");
        assert_eq!(normalize_label("سبک\u{200c}ها"), "سبک ها");
    }

    #[test]
    fn test_line() {
        let text = "First line\n2nd line\r\n3rd line";
        assert_eq!(line(0, text), Some("First line"));
        assert_eq!(line(1, text), Some("First line"));
        assert_eq!(line(2, text), Some("2nd line"));
        assert_eq!(line(3, text), Some("3rd line"));
        assert_eq!(line(4, text), None);
    }

    #[test]
    fn test_extract_after() {
        let text = "hey boys whats up?";
        assert_eq!(extract_after(" boys ", text), Some("whats up?"));
        assert_eq!(extract_after("hey", text), Some(" boys whats up?"));
        assert_eq!(extract_after("john", text), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("1964 "), 1964);
        assert_eq!(leading_int(" 3."), 3);
        assert_eq!(leading_int("present"), 0);
        assert_eq!(leading_int(""), 0);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Bonus Track", "bonus "));
        assert!(!contains_ignore_case("Bonus", "bonus "));
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Stripping citations twice equals stripping once
        #[test]
        fn strip_bracketed_is_idempotent(input in "[a-z \\[\\]0-9]{0,40}") {
            let once = strip_bracketed(&input);
            let twice = strip_bracketed(&once);
            prop_assert_eq!(once, twice);
        }

        /// ASCII text is untouched by numeral normalization
        #[test]
        fn normalize_numerals_is_identity_on_ascii(input in "[ -~]{0,40}") {
            prop_assert_eq!(normalize_numerals(&input), input);
        }

        /// Split elements are never blank and never carry outer whitespace
        #[test]
        fn split_list_elements_are_trimmed(input in "[a-z ,·]{0,40}") {
            for part in split_list(&input) {
                prop_assert!(!part.is_empty());
                prop_assert_eq!(part.trim(), part.as_str());
            }
        }
    }
}
