//! Timestamp parsing and human-readable dates.

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a store timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T14:22:05Z`) and bare calendar dates
/// (`2024-03-01`, read as UTC midnight). Anything else is `None`.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format a date the way it should be read aloud, e.g. `"June 15, 2024"`.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Parse and format in one step; `None` if the timestamp is unparseable.
#[must_use]
pub fn format_timestamp(value: &str) -> Option<String> {
    parse_timestamp(value).map(format_date)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-03-01T14:22:05Z").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 1));
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_rfc3339_with_offset_converts_to_utc() {
        let dt = parse_timestamp("2024-03-01T22:30:00-05:00").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour()), (3, 2, 3));
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let dt = parse_timestamp("2024-06-15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 6, 15));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("soon").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(
            format_timestamp("2024-06-15").as_deref(),
            Some("June 15, 2024")
        );
        assert_eq!(
            format_timestamp("2024-01-05T09:00:00Z").as_deref(),
            Some("January 5, 2024")
        );
    }
}
