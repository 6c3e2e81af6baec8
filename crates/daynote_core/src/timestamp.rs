//! Modification timestamp parsing.
//!
//! # Responsibility
//! - Parse the `<year>-<month>-<day> <hour>:<minute>:<second>` strings the
//!   note reader builds inside the automation script.
//! - Render timestamps in the report's `YYYY-MM-DD HH:MM:SS` form.
//!
//! # Invariants
//! - Values are naive local date-times; no timezone conversion happens.
//! - Missing time, minute or second fields default to zero.
//! - Fields accept ASCII digits only; signs and other characters fail.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REPORT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rejection reason for a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    Empty,
    /// Date part is not three `-`-separated fields.
    MalformedDate(String),
    /// Time part has more than three `:`-separated fields.
    MalformedTime(String),
    /// Anything after the time part.
    TrailingInput(String),
    InvalidField { field: &'static str, value: String },
    /// Fields are numeric but do not form a real calendar date or clock time.
    OutOfRange(String),
}

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "timestamp is empty"),
            Self::MalformedDate(value) => {
                write!(f, "date part `{value}` is not year-month-day")
            }
            Self::MalformedTime(value) => {
                write!(f, "time part `{value}` is not hour:minute:second")
            }
            Self::TrailingInput(value) => write!(f, "unexpected trailing input `{value}`"),
            Self::InvalidField { field, value } => {
                write!(f, "{field} `{value}` is not a number")
            }
            Self::OutOfRange(value) => write!(f, "timestamp `{value}` is out of range"),
        }
    }
}

impl Error for TimestampError {}

/// Parses a reader timestamp into a naive date-time.
///
/// `"2024-3-5 9:7:2"` parses to 2024-03-05 09:07:02; `"2024-3-5"` parses to
/// midnight of that day.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let mut parts = value.split_whitespace();
    let date_part = parts.next().ok_or(TimestampError::Empty)?;
    let time_part = parts.next();
    if let Some(extra) = parts.next() {
        return Err(TimestampError::TrailingInput(extra.to_string()));
    }

    let date_fields: Vec<&str> = date_part.split('-').collect();
    let [year, month, day] = date_fields.as_slice() else {
        return Err(TimestampError::MalformedDate(date_part.to_string()));
    };
    let year = parse_field("year", year)?;
    let month = parse_field("month", month)?;
    let day = parse_field("day", day)?;

    let (hour, minute, second) = match time_part {
        None => (0, 0, 0),
        Some(time_part) => {
            let time_fields: Vec<&str> = time_part.split(':').collect();
            if time_fields.len() > 3 {
                return Err(TimestampError::MalformedTime(time_part.to_string()));
            }
            let hour = parse_field("hour", time_fields[0])?;
            let minute = match time_fields.get(1) {
                Some(raw) => parse_field("minute", raw)?,
                None => 0,
            };
            let second = match time_fields.get(2) {
                Some(raw) => parse_field("second", raw)?,
                None => 0,
            };
            (hour, minute, second)
        }
    };

    let year = i32::try_from(year).map_err(|_| TimestampError::OutOfRange(value.to_string()))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| TimestampError::OutOfRange(value.to_string()))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Renders a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(REPORT_FORMAT).to_string()
}

fn parse_field(field: &'static str, raw: &str) -> Result<u32, TimestampError> {
    let invalid = || TimestampError::InvalidField {
        field,
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}
