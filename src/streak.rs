//! Consecutive-study-day streak tracking
//!
//! The streak counts consecutive local calendar days with at least one
//! graded review. It is advanced from the previous meta values on every
//! graded review and persisted together with the new last-review day.

use chrono::{Duration, Local, NaiveDate};

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day-string format used in the meta partition
pub fn day_string(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Parse a stored day string; unparseable values are treated as absent
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Advance the streak for a graded review happening on `today`.
///
/// `last_day` and `streak` are the values stored *before* this review.
/// Same day: unchanged (already counted). Yesterday: extended by one.
/// Anything else, including the very first review, starts a streak of 1.
pub fn advance_streak(last_day: Option<NaiveDate>, streak: u32, today: NaiveDate) -> u32 {
    match last_day {
        Some(day) if day == today => streak,
        Some(day) if day + Duration::days(1) == today => streak + 1,
        _ => 1,
    }
}
