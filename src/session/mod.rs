//! Study sessions: queue construction, grading flow, stats, reset
//!
//! This module provides:
//! - The ephemeral `StudyQueue` (ordered word ids + current pointer)
//! - Due-queue and any-queue builders over the catalog and progress store
//! - `StudySession` driving the grade/advance loop
//! - Aggregate statistics and the administrative full reset

pub mod queue;
pub mod study;

pub use queue::{build_any_queue, build_due_queue, StudyQueue, ANY_QUEUE_POOL};
pub use study::{
    collect_stats, full_reset, record_review_day, Stats, StudySession, FALLBACK_QUEUE_LEN,
};
