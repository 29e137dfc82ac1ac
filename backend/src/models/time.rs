//! Timestamp parsing for uploaded sensor logs and query parameters.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layouts accepted for timestamps without an explicit UTC offset.
///
/// `%.f` consumes an optional fractional-seconds part, so each layout also
/// matches whole-second values.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Layouts accepted for timestamps carrying a `±HH:MM` or `±HHMM` offset.
/// Hour-only `±HH` offsets are widened to `±HH:00` before matching.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse a sensor timestamp into UTC.
///
/// Accepts `YYYY-MM-DD[T| ]HH:MM[:SS[.fraction]]`, optionally followed by `Z`
/// or a numeric UTC offset. Timestamps without an offset are taken as UTC.
/// Returns `None` for anything else, including date-only values.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(naive) = raw.strip_suffix(['Z', 'z']) {
        return parse_naive(naive).map(|dt| dt.and_utc());
    }

    if let Some(dt) = parse_with_offset(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive(raw).map(|dt| dt.and_utc())
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    let widened;
    let raw = if has_hour_only_offset(raw) {
        widened = format!("{}:00", raw);
        widened.as_str()
    } else {
        raw
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
}

/// `...HH:MM[:SS]±HH`: a sign followed by exactly two digits, after the time.
fn has_hour_only_offset(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let n = bytes.len();
    n > 3
        && matches!(bytes[n - 3], b'+' | b'-')
        && bytes[n - 2..].iter().all(u8::is_ascii_digit)
        && raw[..n - 3].contains(':')
}

/// Inclusive timestamp window; a missing end leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// The unbounded range.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| timestamp >= from) && self.to.map_or(true, |to| timestamp <= to)
    }

    /// Whether no timestamp can satisfy the range (`from` after `to`).
    pub fn is_empty(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |ts: Option<DateTime<Utc>>| ts.map_or_else(|| "*".to_string(), |t| t.to_rfc3339());
        write!(f, "[{}, {}]", side(self.from), side(self.to))
    }
}
