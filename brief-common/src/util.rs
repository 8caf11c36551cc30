//! Text and date helpers for article preparation and report rendering.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Average reading speed used by [`reading_time`].
pub const WORDS_PER_MINUTE: usize = 200;

/// Date-time layouts seen in news feeds, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
];

/// Date-only layouts, tried after [`DATETIME_FORMATS`].
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%B %d, %Y", "%d %B %Y"];

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

fn disallowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s.,;:?!]").expect("static regex"))
}

/// Collapse whitespace and drop everything except word characters,
/// whitespace and basic punctuation (`. , ; : ? !`).
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = whitespace_re().replace_all(text, " ");
    disallowed_re()
        .replace_all(collapsed.trim(), "")
        .into_owned()
}

/// Truncate to at most `max_chars` characters, cutting back to the last
/// word boundary and appending "...".
///
/// Works on character boundaries, so multi-byte text is safe.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let head = &text[..idx];
    let cut = head.rsplit_once(' ').map_or(head, |(before, _)| before);
    format!("{cut}...")
}

/// Estimated reading time at [`WORDS_PER_MINUTE`].
pub fn reading_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words / WORDS_PER_MINUTE;

    match minutes {
        0 => "Less than a minute".to_string(),
        1 => "About 1 minute".to_string(),
        n => format!("About {n} minutes"),
    }
}

/// Normalize a date string to `YYYY-MM-DD`.
///
/// Unrecognized input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d").to_string();
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }

    tracing::trace!(date = %raw, "Unrecognized date format, keeping original");
    raw.to_string()
}

/// Cache key for a company's article batch on a given day,
/// e.g. `("Tesla Motors", 2024-03-01)` → `teslamotors20240301`.
pub fn cache_key(company: &str, date: NaiveDate) -> String {
    let name: String = company
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    format!("{}{}", name, date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(""), "");
        assert_eq!(
            clean_text("  Tesla   shares\t\njump 5%!  "),
            "Tesla shares jump 5!"
        );
        assert_eq!(clean_text("Q3: profit (record) & up?"), "Q3: profit record  up?");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 100), "short");
        assert_eq!(truncate_text("hello brave new world", 12), "hello brave...");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("日本語のテキスト", 3), "日本語...");
    }

    #[test_case(0, "Less than a minute")]
    #[test_case(199, "Less than a minute")]
    #[test_case(200, "About 1 minute")]
    #[test_case(399, "About 1 minute")]
    #[test_case(1000, "About 5 minutes")]
    fn test_reading_time(words: usize, expected: &str) {
        let text = vec!["word"; words].join(" ");
        assert_eq!(reading_time(&text), expected);
    }

    #[test_case("2024-01-15T09:30:00", "2024-01-15" ; "iso datetime")]
    #[test_case("2024-01-15T09:30:00Z", "2024-01-15" ; "iso datetime utc")]
    #[test_case("2024-01-15 09:30:00", "2024-01-15" ; "space datetime")]
    #[test_case("2024-01-15", "2024-01-15" ; "iso date")]
    #[test_case("15-01-2024", "2024-01-15" ; "day first")]
    #[test_case("January 15, 2024", "2024-01-15" ; "long month first")]
    #[test_case("15 January 2024", "2024-01-15" ; "long day first")]
    #[test_case("Mon, 15 Jan 2024 09:30:00", "2024-01-15" ; "rfc2822 style")]
    #[test_case("yesterday", "yesterday" ; "unrecognized")]
    fn test_format_date(raw: &str, expected: &str) {
        assert_eq!(format_date(raw), expected);
    }

    #[test]
    fn test_cache_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(cache_key("Tesla Motors", date), "teslamotors20240301");
        assert_eq!(cache_key("ACME", date), "acme20240301");
    }
}
