//! Lenient parsing of stored date strings.
//!
//! Stored dates are either `YYYY-MM-DD` or full timestamps; older records
//! entered through pt-BR forms may carry `DD/MM/YYYY`. Anything else is
//! treated as unparseable and excluded by range filters.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const ISO_DATE: &str = "%Y-%m-%d";
const BR_DATE: &str = "%d/%m/%Y";
const LOCAL_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a stored date, keeping only the calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, ISO_DATE) {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    for format in LOCAL_TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp.date());
        }
    }
    NaiveDate::parse_from_str(value, BR_DATE).ok()
}

/// Canonical `YYYY-MM-DD` rendering used for every date this crate writes.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
