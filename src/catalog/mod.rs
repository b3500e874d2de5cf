//! Word catalog: the immutable vocabulary list for a session
//!
//! This module provides:
//! - Catalog entry models and part-of-speech normalization
//! - Deterministic identifier derivation from entry content
//! - Loading from a local file or an HTTP source

pub mod loader;
pub mod models;

pub use loader::{Catalog, CatalogError};
pub use models::{word_id, PartOfSpeech, WordEntry};
