//! Lenient parsing of calendar instants.

use crate::Result;
use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a date followed by `HH:MM`,
/// `HH:MM:SS` or `HH:MM:SS.fff` (separated by `T` or a space).
///
/// Missing fields take their earliest value.
pub fn parse_instant(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(instant) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(instant);
        }
    }

    let padded = match text.matches('-').count() {
        0 => format!("{}-01-01", text),
        1 => format!("{}-01", text),
        _ => text.to_string(),
    };
    let date = NaiveDate::parse_from_str(&padded, "%Y-%m-%d")?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}
