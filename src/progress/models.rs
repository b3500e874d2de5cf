//! Data models for per-word study progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meta key for the last local calendar day with a graded review
pub const META_LAST_REVIEW_DAY: &str = "lastReviewDay";
/// Meta key for the consecutive-day streak count
pub const META_STREAK: &str = "streak";

/// Starting ease factor for a fresh word
pub const EASE_START: f32 = 2.5;

/// Reps threshold for a word to count as learned
pub const LEARNED_MIN_REPS: u32 = 6;
/// Interval threshold (days) for a word to count as learned
pub const LEARNED_MIN_INTERVAL_DAYS: f32 = 14.0;

/// Spaced-repetition state for one word, keyed by the derived word id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub id: String,
    /// When the word is next due for review
    pub due_at: DateTime<Utc>,
    /// Current scheduled interval in days
    #[serde(default)]
    pub interval_days: f32,
    /// Ease factor governing interval growth (default 2.5)
    #[serde(default = "default_ease")]
    pub ease: f32,
    /// Consecutive-ish successful repetitions
    #[serde(default)]
    pub reps: u32,
    /// Lifetime review count
    #[serde(default)]
    pub total: u32,
    /// Lifetime correct (non-"again") count
    #[serde(default)]
    pub correct: u32,
}

fn default_ease() -> f32 {
    EASE_START
}

impl WordProgress {
    /// Default record for a word first seen at `now`: immediately due,
    /// nothing reviewed yet.
    pub fn new(id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            due_at: now,
            interval_days: 0.0,
            ease: EASE_START,
            reps: 0,
            total: 0,
            correct: 0,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }

    /// Never graded
    pub fn is_new(&self) -> bool {
        self.total == 0
    }

    /// Durably retained per the learned heuristic
    pub fn is_learned(&self) -> bool {
        self.reps >= LEARNED_MIN_REPS && self.interval_days >= LEARNED_MIN_INTERVAL_DAYS
    }
}
