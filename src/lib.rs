//! Repaso: a Spanish vocabulary flashcard scheduler
//!
//! The scheduling core behind a flip-card study tool: an immutable word
//! catalog, per-word progress records persisted locally, a grade-driven
//! interval update, randomized due/fallback study queues, and a
//! consecutive-day streak. Presentation is a thin collaborator: it pops
//! word ids off a session queue and feeds grades back in.

pub mod catalog;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod streak;
