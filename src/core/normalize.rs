//! Field-level cleanup for quote export values.
//!
//! Every function here is total: dirty input degrades to an empty string or
//! `None`, never to an error, so one bad cell cannot abort a run.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases the trimmed value and capitalises the first letter of every word.
///
/// Words are maximal runs of letters, digits and underscores, so
/// `"o'NEIL-smith"` becomes `"O'Neil-Smith"` and `"2nd"` stays `"2nd"`.
pub fn proper_case(raw: Option<&str>) -> String {
    let Some(value) = raw else {
        return String::new();
    };

    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for c in value.trim().chars() {
        if is_word_char(c) {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.extend(c.to_lowercase());
            in_word = false;
        }
    }
    out
}

/// Normalizes a phone number to the 11-digit `1XXXXXXXXXX` form.
///
/// Numbers with fewer than ten digits are passed through as bare digits.
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    // Country codes and extensions in front are dropped with the overflow.
    let digits = if digits.len() >= 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        digits
    };

    if digits.len() == 10 {
        return Some(format!("1{}", digits));
    }
    Some(digits)
}

/// Parses a money amount such as `"$1,200.50"`.
///
/// Only digits, `.` and `-` survive cleaning. Accounting parentheses are
/// discarded along with everything else, so `"($500)"` reads as `500`.
pub fn parse_currency(raw: Option<&str>) -> Option<f64> {
    let cleaned: String = raw?
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if matches!(cleaned.as_str(), "" | "-" | ".") {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn parse_year(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok()
}

/// Two-digit model year, `"2024"` -> `"24"`.
pub fn format_year(raw: Option<&str>) -> String {
    match parse_year(raw) {
        Some(year) => format!("{:02}", year.rem_euclid(100)),
        None => String::new(),
    }
}

type DateExtractor = fn(&Captures) -> Option<NaiveDate>;

fn capture_u32(caps: &Captures, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn capture_i32(caps: &Captures, index: usize) -> Option<i32> {
    caps.get(index)?.as_str().parse().ok()
}

/// Four-digit year; year 0 is not a calendar year.
fn capture_year(caps: &Captures, index: usize) -> Option<i32> {
    capture_i32(caps, index).filter(|year| *year >= 1)
}

fn month_day_year(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(capture_year(caps, 3)?, capture_u32(caps, 1)?, capture_u32(caps, 2)?)
}

fn month_day_short_year(caps: &Captures) -> Option<NaiveDate> {
    // Same pivot as POSIX strptime: 69-99 -> 19xx, 00-68 -> 20xx.
    let short = capture_i32(caps, 3)?;
    let year = if short >= 69 { 1900 + short } else { 2000 + short };
    NaiveDate::from_ymd_opt(year, capture_u32(caps, 1)?, capture_u32(caps, 2)?)
}

fn year_month_day(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(capture_year(caps, 1)?, capture_u32(caps, 2)?, capture_u32(caps, 3)?)
}

/// Accepted purchase-date layouts, tried top to bottom.
static DATE_PATTERNS: Lazy<Vec<(Regex, DateExtractor)>> = Lazy::new(|| {
    let patterns: [(&str, DateExtractor); 4] = [
        (r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$", month_day_year),
        (r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2})$", month_day_short_year),
        (r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$", year_month_day),
        (r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})$", year_month_day),
    ];
    patterns
        .into_iter()
        .map(|(pattern, extract)| {
            (
                Regex::new(pattern).expect("date pattern is a valid regex"),
                extract,
            )
        })
        .collect()
});

/// Rewrites a purchase date as `M/D/YY`.
///
/// Values that match none of the known layouts, or that name an impossible
/// calendar day, come back trimmed but otherwise untouched.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return String::new();
    };

    DATE_PATTERNS
        .iter()
        .find_map(|(regex, extract)| regex.captures(value).and_then(|caps| extract(&caps)))
        .map(|date| {
            format!(
                "{}/{}/{:02}",
                date.month(),
                date.day(),
                date.year().rem_euclid(100)
            )
        })
        .unwrap_or_else(|| value.to_string())
}
