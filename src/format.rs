/// Text codecs for durations, start times and record rows.
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use thiserror::Error;

use crate::types::Record;

pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration format: use hh:mm:ss")]
    Format,
    #[error(
        "invalid duration: hours, minutes, and seconds must be non-negative, minutes and seconds <= 59"
    )]
    OutOfRange,
}

/// Formats whole seconds as `hh:mm:ss`. Hours are not capped at 99.
pub fn format_duration(seconds: i64) -> String {
    let total_seconds = seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses `hh:mm:ss` into whole seconds. Surrounding whitespace is ignored;
/// each component must be plain digits, optionally with a leading `-`.
pub fn parse_duration(input: &str) -> Result<i64, DurationError> {
    let mut parts = input.trim().split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(DurationError::Format);
    };
    let component = |value: &str| {
        let digits = value.strip_prefix('-').unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DurationError::Format);
        }
        value.parse::<i64>().map_err(|_| DurationError::OutOfRange)
    };
    let (hours, minutes, seconds) = (component(hours)?, component(minutes)?, component(seconds)?);
    if hours < 0 || minutes < 0 || seconds < 0 || minutes > 59 || seconds > 59 {
        return Err(DurationError::OutOfRange);
    }
    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes * 60 + seconds))
        .ok_or(DurationError::OutOfRange)
}

/// Parses a `YYYY-MM-DD HH:MM:SS` wall-clock time in the local time zone.
pub fn parse_start_time(input: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), START_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest()
}

pub fn format_start_time(value: &DateTime<Local>) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

pub fn format_record_title(record: &Record) -> String {
    format!(
        "{} - {} @ {}",
        record.project,
        format_duration(record.duration_seconds),
        format_start_time(&record.start_time)
    )
}
