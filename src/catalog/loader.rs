//! Catalog loading from a local file or an HTTP source
//!
//! The catalog is read-only and loaded once per session. Loading never
//! touches the progress store, and a malformed source fails the whole
//! load: presenting a partial study set would be worse than failing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use super::models::{PartOfSpeech, WordEntry};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog entry {0} has a blank required field")]
    BlankEntry(usize),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Raw on-disk shape of a catalog entry: `partOfSpeech` is optional,
/// `spanish` and `english` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    spanish: String,
    english: String,
    part_of_speech: Option<String>,
}

/// The immutable word catalog for a session
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<WordEntry>,
    // id -> entry index, built in load order so a duplicate id resolves
    // to the later entry
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a local JSON file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_slice(content.as_bytes())?;
        info!("loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Fetch the catalog from an HTTP(S) source
    pub fn load_url(url: &str) -> Result<Self> {
        let raw: Vec<RawEntry> = reqwest::blocking::get(url)?.error_for_status()?.json()?;
        let catalog = Self::from_raw(raw)?;
        info!("loaded {} words from {}", catalog.len(), url);
        Ok(catalog)
    }

    /// Parse a catalog from raw JSON bytes (must be a JSON array)
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: Vec<RawEntry> = serde_json::from_slice(bytes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: Vec<RawEntry>) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for (i, r) in raw.into_iter().enumerate() {
            if r.spanish.trim().is_empty() || r.english.trim().is_empty() {
                return Err(CatalogError::BlankEntry(i));
            }
            let pos = PartOfSpeech::parse(r.part_of_speech.as_deref());
            entries.push(WordEntry::new(&r.spanish, &r.english, pos));
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<WordEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.insert(entry.id.clone(), i);
        }
        Self { entries, index }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
