//! Storage operations for study progress
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── progress.json   # Map of word id -> WordProgress
//! └── meta.json       # Map of name -> string (lastReviewDay, streak)
//! ```
//!
//! Both partitions are written whole on every update: a record is visible
//! either absent or complete. The store assumes a single logical writer.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::debug;
use thiserror::Error;

use super::models::WordProgress;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// File-backed store for progress records and session meta
pub struct ProgressStorage {
    base_path: PathBuf,
}

impl ProgressStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("repaso"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn progress_path(&self) -> PathBuf {
        self.base_path.join("progress.json")
    }

    fn meta_path(&self) -> PathBuf {
        self.base_path.join("meta.json")
    }

    fn load_progress(&self) -> Result<HashMap<String, WordProgress>> {
        let path = self.progress_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_progress(&self, records: &HashMap<String, WordProgress>) -> Result<()> {
        self.init()?;
        fs::write(self.progress_path(), serde_json::to_string_pretty(records)?)?;
        Ok(())
    }

    fn load_meta(&self) -> Result<HashMap<String, String>> {
        let path = self.meta_path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_meta(&self, meta: &HashMap<String, String>) -> Result<()> {
        self.init()?;
        fs::write(self.meta_path(), serde_json::to_string_pretty(meta)?)?;
        Ok(())
    }

    // ==================== Progress Operations ====================

    /// Get the progress record for a word, if one has been persisted
    pub fn get(&self, id: &str) -> Result<Option<WordProgress>> {
        let mut records = self.load_progress()?;
        Ok(records.remove(id))
    }

    /// Upsert a single progress record
    pub fn put(&self, record: &WordProgress) -> Result<()> {
        let mut records = self.load_progress()?;
        records.insert(record.id.clone(), record.clone());
        self.save_progress(&records)
    }

    /// Upsert a batch of progress records in one write
    pub fn put_many(&self, batch: &[WordProgress]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut records = self.load_progress()?;
        for record in batch {
            records.insert(record.id.clone(), record.clone());
        }
        debug!("persisted {} progress records", batch.len());
        self.save_progress(&records)
    }

    /// Get the record for a word, creating and persisting the default
    /// record if none exists. Absence of a record is not an error.
    pub fn get_or_create(&self, id: &str, now: DateTime<Utc>) -> Result<WordProgress> {
        if let Some(record) = self.get(id)? {
            return Ok(record);
        }
        let record = WordProgress::new(id, now);
        self.put(&record)?;
        Ok(record)
    }

    /// All persisted progress records, reflecting every prior put
    pub fn get_all(&self) -> Result<Vec<WordProgress>> {
        Ok(self.load_progress()?.into_values().collect())
    }

    /// Snapshot of the progress partition as an id-keyed map
    pub fn get_all_map(&self) -> Result<HashMap<String, WordProgress>> {
        self.load_progress()
    }

    // ==================== Meta Operations ====================

    pub fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let mut meta = self.load_meta()?;
        Ok(meta.remove(key))
    }

    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        let mut meta = self.load_meta()?;
        meta.insert(key.to_string(), value.to_string());
        self.save_meta(&meta)
    }

    // ==================== Reset ====================

    /// Remove both partitions entirely
    pub fn clear(&self) -> Result<()> {
        for path in [self.progress_path(), self.meta_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
