//! Expected ship date carried as an order tag.
//!
//! Merchandisers tag made-to-order items with `w3dd:<date>` when the
//! workshop commits to a dispatch date. The tag is free text, so a bad tag is
//! simply ignored rather than treated as an error.

use chrono::{DateTime, Utc};

use super::date::parse_timestamp;

/// Tag marker for the expected ship date, matched case-insensitively.
pub const SHIP_DATE_TAG_PREFIX: &str = "w3dd";

/// Expected ship date from the first `w3dd:` tag, at UTC midnight.
///
/// Only the first matching tag is considered. Returns `None` if no tag
/// matches, the value after the colon is blank, or it is not a date.
#[must_use]
pub fn expected_ship_date<S: AsRef<str>>(tags: &[S]) -> Option<DateTime<Utc>> {
    let value = tags.iter().find_map(|tag| ship_date_value(tag.as_ref()))?;

    parse_timestamp(value)
        .and_then(|dt| dt.date_naive().and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn ship_date_value(tag: &str) -> Option<&str> {
    let tag = tag.trim_start();
    let prefix = tag.get(..SHIP_DATE_TAG_PREFIX.len())?;

    if !prefix.eq_ignore_ascii_case(SHIP_DATE_TAG_PREFIX) {
        return None;
    }

    tag.get(SHIP_DATE_TAG_PREFIX.len()..)?
        .strip_prefix(':')
        .map(str::trim)
}
