//! Per-word study progress and its durable storage
//!
//! This module provides:
//! - The `WordProgress` record (one per catalog word, created lazily)
//! - Session meta entries (last review day, streak)
//! - A file-backed store with two partitions (progress records, meta)

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{ProgressStorage, StorageError};
