//! Grade-driven interval scheduling
//!
//! A simplified spaced-repetition policy in the SM-2 family: each graded
//! review adjusts the word's ease factor, then either schedules a short
//! retry ("again") or grows the review interval by a grade-dependent
//! factor. Fully deterministic given the review time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::WordProgress;

/// Ease factor bounds; keeps schedules from collapsing or running away
pub const EASE_MIN: f32 = 1.3;
pub const EASE_MAX: f32 = 3.2;

/// Retry delay after an "again" grade
pub const AGAIN_RETRY_MINUTES: i64 = 10;

/// Milliseconds in a day, used for sub-day interval rounding
const MS_PER_DAY: f64 = 86_400_000.0;

/// Recall quality reported by the user for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    /// Failed to recall; retry shortly
    Again,
    /// Recalled with difficulty
    Hard,
    /// Recalled normally
    Good,
    /// Recalled effortlessly
    Easy,
}

impl Grade {
    fn ease_delta(self) -> f32 {
        match self {
            Grade::Again => -0.20,
            Grade::Hard => -0.05,
            Grade::Good => 0.0,
            Grade::Easy => 0.10,
        }
    }

    /// Interval growth factor applied once a word is past its first two
    /// successful reviews
    fn growth_factor(self, ease: f32) -> f32 {
        match self {
            Grade::Again => 0.0,
            Grade::Hard => ease * 0.85,
            Grade::Good => ease,
            Grade::Easy => ease * 1.15,
        }
    }

    /// Fixed interval (days) for the second successful review
    fn second_interval(self) -> f32 {
        match self {
            Grade::Again => 0.0,
            Grade::Hard => 2.0,
            Grade::Good => 3.0,
            Grade::Easy => 4.0,
        }
    }
}

/// Apply a grade to a progress record, returning the updated record.
///
/// Pure: the caller supplies `now` and persists the result. "again" drops
/// a rep (floored at 0) and schedules a 10-minute retry regardless of the
/// prior interval; any other grade advances the interval by the current
/// rep stage and pushes `due_at` out by the rounded interval.
pub fn apply_grade(progress: &WordProgress, grade: Grade, now: DateTime<Utc>) -> WordProgress {
    let mut p = progress.clone();

    p.total += 1;
    if grade != Grade::Again {
        p.correct += 1;
    }

    p.ease = (p.ease + grade.ease_delta()).clamp(EASE_MIN, EASE_MAX);

    if grade == Grade::Again {
        p.reps = p.reps.saturating_sub(1);
        p.interval_days = 0.0;
        p.due_at = now + Duration::minutes(AGAIN_RETRY_MINUTES);
        return p;
    }

    p.interval_days = match p.reps {
        0 => 1.0,
        1 => grade.second_interval(),
        _ => (p.interval_days * grade.growth_factor(p.ease)).max(1.0),
    };
    p.reps += 1;

    let due_ms = (p.interval_days as f64 * MS_PER_DAY).round() as i64;
    p.due_at = now + Duration::milliseconds(due_ms);
    p
}
