//! Data models for the word catalog

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Part of speech for a catalog entry
///
/// The catalog source stores these as free-form lowercase strings;
/// anything outside the known set normalizes to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Pronoun,
    Interjection,
    Determiner,
    Other,
}

impl Default for PartOfSpeech {
    fn default() -> Self {
        Self::Other
    }
}

impl PartOfSpeech {
    /// Parse a raw catalog value. Never fails: unknown or missing
    /// values become `Other`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("noun") => Self::Noun,
            Some("verb") => Self::Verb,
            Some("adjective") => Self::Adjective,
            Some("adverb") => Self::Adverb,
            Some("preposition") => Self::Preposition,
            Some("conjunction") => Self::Conjunction,
            Some("pronoun") => Self::Pronoun,
            Some("interjection") => Self::Interjection,
            Some("determiner") => Self::Determiner,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Pronoun => "pronoun",
            Self::Interjection => "interjection",
            Self::Determiner => "determiner",
            Self::Other => "other",
        }
    }
}

/// Derive the stable identifier for a word.
///
/// `NFC(trim(spanish)) + "__" + part_of_speech`. Catalog entries carry no
/// external id, so identity is derived from content; renaming a word in
/// the catalog changes its identity and orphans its progress history.
pub fn word_id(spanish: &str, part_of_speech: PartOfSpeech) -> String {
    let normalized: String = spanish.trim().nfc().collect();
    format!("{}__{}", normalized, part_of_speech.as_str())
}

/// A single vocabulary entry, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    pub spanish: String,
    pub english: String,
    pub part_of_speech: PartOfSpeech,
}

impl WordEntry {
    pub fn new(spanish: &str, english: &str, part_of_speech: PartOfSpeech) -> Self {
        Self {
            id: word_id(spanish, part_of_speech),
            spanish: spanish.trim().to_string(),
            english: english.trim().to_string(),
            part_of_speech,
        }
    }
}
