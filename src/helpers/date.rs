//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO date or timestamp into a calendar date
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
/// plain `YYYY-MM-DD` dates.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// chrono format string for a locale's short date
pub fn locale_date_format(locale: &str) -> &'static str {
    match locale {
        "ru-RU" | "ru" | "de-DE" | "de" => "%d.%m.%Y",
        "en-US" | "en" => "%-m/%-d/%Y",
        "en-GB" | "fr-FR" | "fr" => "%d/%m/%Y",
        _ => "%Y-%m-%d",
    }
}

/// Format an ISO date string the way the locale writes short dates
///
/// Returns `None` when the input is not a recognizable date.
///
/// # Examples
/// ```
/// use hashsite::helpers::locale_date;
/// assert_eq!(locale_date("2024-03-05T10:00:00Z", "ru-RU").as_deref(), Some("05.03.2024"));
/// ```
pub fn locale_date(iso: &str, locale: &str) -> Option<String> {
    parse_iso_date(iso).map(|d| d.format(locale_date_format(locale)).to_string())
}
