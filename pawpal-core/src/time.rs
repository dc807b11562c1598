//! Time utilities: wall-clock slots inside a single day.
//!
//! Everything here is anchored on one fixed calendar date so minute arithmetic
//! stays correct across hour boundaries without dragging in timezones.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::PlanError;

/// Fixed anchor date for slot arithmetic.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Format a window-relative offset as "HH:MM".
///
/// `start_hour` is the window start, `offset_minutes` the cursor inside it.
pub fn format_slot(start_hour: i32, offset_minutes: i64) -> String {
    let hour = i64::from(start_hour) + offset_minutes / 60;
    let minute = offset_minutes % 60;
    format!("{:02}:{:02}", hour, minute)
}

/// Parse "HH:MM" into a time of day.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, PlanError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| PlanError::InvalidTime(s.to_string()))
}

/// Anchor an "HH:MM" start on the reference date and return `[start, end)`.
pub fn slot_interval(start: &str, duration_minutes: u32) -> Result<(NaiveDateTime, NaiveDateTime), PlanError> {
    let start = reference_date().and_time(parse_hhmm(start)?);
    let end = start + Duration::minutes(i64::from(duration_minutes));
    Ok((start, end))
}

/// Helper: render an hour-of-day like "08:00".
pub fn format_hour(hour: i32) -> String {
    format!("{:02}:00", hour)
}
