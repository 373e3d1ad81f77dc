//! Lenient incident timestamp parsing
//!
//! Accepts the handful of layouts that show up in exported incident logs:
//! - RFC 3339 with offset or `Z` (`2015-03-13T23:45:00-05:00`), kept as wall-clock time
//! - ISO date-time with a space and an offset (`2015-03-13 23:45:00-05:00`)
//! - ISO date-time with `T` or space, with or without seconds/fractions
//! - US `MM/DD/YYYY` with a 24-hour or 12-hour AM/PM clock
//! - Date-only values, which land on midnight
//!
//! Offsets are never normalized: the hour of `23:45-05:00` is 23.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::trace;

/// Built-in date-time layouts, tried in order after any configured formats
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Layouts carrying a UTC offset that RFC 3339 parsing rejects
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Built-in date-only layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses incident time strings into naive date-times
#[derive(Debug, Clone, Default)]
pub struct TimestampParser {
    /// User-supplied layouts, tried before the built-in ones
    extra_formats: Vec<String>,
}

impl TimestampParser {
    /// Create a parser with only the built-in layouts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that tries `formats` first
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra_formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a raw cell value; `None` when empty or unrecognized
    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        for format in &self.extra_formats {
            if let Some(parsed) = parse_with(raw, format) {
                return Some(parsed);
            }
        }

        let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        });
        if let Some(with_offset) = with_offset {
            return Some(with_offset.naive_local());
        }

        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .or_else(|| {
                trace!(value = raw, "unrecognized timestamp");
                None
            })
    }
}

/// Try one layout as a date-time, then as a bare date
fn parse_with(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, format).ok().or_else(|| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

/// Parse with the built-in layouts only
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TimestampParser::new().parse(raw)
}
