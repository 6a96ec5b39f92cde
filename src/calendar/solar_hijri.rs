//! Solar Hijri (Jalali) to Gregorian conversion.
//!
//! Uses the break-year table of the astronomical Jalali calendar: leap years
//! follow 33-year cycles between the listed break years, which keeps the
//! conversion exact for years -61..3177 without any approximation.

use chrono::{Days, NaiveDate};

/// Years in which the 33-year leap cycle restarts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324, 2394,
    2456, 3178,
];

/// Persian month names, Farvardin first.
pub const MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Where a Solar Hijri year sits relative to the Gregorian calendar.
struct YearInfo {
    /// Gregorian year in which the Solar Hijri year starts
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls
    march_day: u32,
    /// 0 when the year has 30 days in Esfand
    leap: i32,
}

fn year_info(jy: i32) -> Option<YearInfo> {
    if jy < BREAKS[0] || jy >= BREAKS[BREAKS.len() - 1] {
        return None;
    }

    let gregorian_year = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        gregorian_year,
        march_day: u32::try_from(march_day).ok()?,
        leap,
    })
}

/// True if the Solar Hijri year has a 30-day Esfand.
pub fn is_leap_year(jy: i32) -> bool {
    year_info(jy).is_some_and(|info| info.leap == 0)
}

/// Number of days in a Solar Hijri month, `None` for an invalid month.
pub fn month_length(jy: i32, jm: u32) -> Option<u32> {
    match jm {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_leap_year(jy) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Convert a Solar Hijri date to the Gregorian calendar.
///
/// Returns `None` for out-of-range years and invalid month/day numbers.
pub fn to_gregorian(jy: i32, jm: u32, jd: u32) -> Option<NaiveDate> {
    if jd == 0 || jd > month_length(jy, jm)? {
        return None;
    }

    let info = year_info(jy)?;
    let new_year = NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day)?;

    // Farvardin..Shahrivar have 31 days, the rest 30.
    let offset = (jm - 1) * 31 - (jm / 7) * (jm - 7) + jd - 1;
    new_year.checked_add_days(Days::new(u64::from(offset)))
}

/// Month number (1-12) for a Persian month name.
pub fn month_number(name: &str) -> Option<u32> {
    let name = crate::text::normalize_script(name.trim());
    MONTHS
        .iter()
        .position(|m| *m == name)
        .and_then(|i| u32::try_from(i + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_known_conversions() {
        assert_eq!(to_gregorian(1352, 2, 5), Some(ymd(1973, 4, 25)));
        assert_eq!(to_gregorian(1403, 1, 1), Some(ymd(2024, 3, 20)));
        assert_eq!(to_gregorian(1357, 11, 22), Some(ymd(1979, 2, 11)));
        assert_eq!(to_gregorian(1333, 1, 1), Some(ymd(1954, 3, 21)));
    }

    #[test]
    fn test_last_day_of_year() {
        // 1399 is a leap year, Esfand 30 is the day before Nowruz 1400
        assert!(is_leap_year(1399));
        assert_eq!(to_gregorian(1399, 12, 30), Some(ymd(2021, 3, 20)));
        assert!(!is_leap_year(1400));
        assert_eq!(to_gregorian(1400, 12, 30), None);
        assert_eq!(to_gregorian(1400, 12, 29), Some(ymd(2022, 3, 20)));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(to_gregorian(1352, 0, 5), None);
        assert_eq!(to_gregorian(1352, 13, 5), None);
        assert_eq!(to_gregorian(1352, 7, 31), None);
        assert_eq!(to_gregorian(1352, 1, 0), None);
        assert_eq!(to_gregorian(4000, 1, 1), None);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("فروردین"), Some(1));
        assert_eq!(month_number("اردیبهشت"), Some(2));
        assert_eq!(month_number(" اسفند "), Some(12));
        assert_eq!(month_number("May"), None);
    }
}
