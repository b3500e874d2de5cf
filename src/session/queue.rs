//! Study queue construction
//!
//! Two selection strategies over the catalog:
//! - the due queue: words whose scheduled review time has passed,
//!   uniformly shuffled and truncated
//! - the any queue: words regardless of due time, biased toward earlier
//!   due times, sampled without replacement
//!
//! Both are generic over the random source so tests can seed one and
//! assert structure without asserting order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::progress::{ProgressStorage, WordProgress};
use crate::progress::storage::Result;

/// Candidate pool size for the any queue: the N earliest-due words
pub const ANY_QUEUE_POOL: usize = 800;

/// An ordered study set with a pointer to the current word.
/// Ephemeral: rebuilt per session, never persisted.
#[derive(Debug, Clone)]
pub struct StudyQueue {
    ids: Vec<String>,
    position: usize,
    /// True when this is a mixed (not-all-due) fallback set
    pub mixed: bool,
}

impl StudyQueue {
    pub fn new(ids: Vec<String>, mixed: bool) -> Self {
        Self {
            ids,
            position: 0,
            mixed,
        }
    }

    /// Id of the word currently being studied
    pub fn current(&self) -> Option<&str> {
        self.ids.get(self.position).map(String::as_str)
    }

    /// Move past the current word
    pub fn advance(&mut self) {
        if self.position < self.ids.len() {
            self.position += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Words left including the current one
    pub fn remaining(&self) -> usize {
        self.ids.len() - self.position
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Build a queue of due words.
///
/// Scans the catalog in order, persisting a default record for every word
/// not yet in the store (one batch write), then shuffles the full due set
/// and truncates to `limit`.
pub fn build_due_queue<R: Rng>(
    catalog: &Catalog,
    storage: &ProgressStorage,
    limit: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let records = storage.get_all_map()?;

    let mut created: Vec<WordProgress> = Vec::new();
    let mut due: Vec<String> = Vec::new();
    for entry in catalog.entries() {
        match records.get(&entry.id) {
            Some(record) => {
                if record.is_due(now) {
                    due.push(entry.id.clone());
                }
            }
            None => {
                // Fresh words are due immediately
                created.push(WordProgress::new(&entry.id, now));
                due.push(entry.id.clone());
            }
        }
    }
    storage.put_many(&created)?;

    due.shuffle(rng);
    due.truncate(limit);
    debug!("due queue: {} of {} words", due.len(), catalog.len());
    Ok(due)
}

/// Build a fallback queue ignoring due times.
///
/// Every catalog word is scored by its current (or default) due time;
/// the `ANY_QUEUE_POOL` earliest-due words form the candidate pool, from
/// which `limit` distinct ids are drawn uniformly by rejection sampling.
/// Unlike the due queue this never persists records.
pub fn build_any_queue<R: Rng>(
    catalog: &Catalog,
    storage: &ProgressStorage,
    limit: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let records = storage.get_all_map()?;

    let mut scored: Vec<(&str, DateTime<Utc>)> = catalog
        .entries()
        .iter()
        .map(|entry| {
            let due_at = records.get(&entry.id).map(|r| r.due_at).unwrap_or(now);
            (entry.id.as_str(), due_at)
        })
        .collect();
    scored.sort_by_key(|&(_, due_at)| due_at);

    let pool: Vec<&str> = scored
        .iter()
        .take(ANY_QUEUE_POOL)
        .map(|&(id, _)| id)
        .collect();
    if pool.is_empty() {
        return Ok(Vec::new());
    }

    let want = limit.min(pool.len());
    let mut chosen: HashSet<usize> = HashSet::with_capacity(want);
    let mut ids = Vec::with_capacity(want);
    while ids.len() < want {
        let i = rng.gen_range(0..pool.len());
        if chosen.insert(i) {
            ids.push(pool[i].to_string());
        }
    }
    debug!("any queue: {} words from a pool of {}", ids.len(), pool.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::catalog::{PartOfSpeech, WordEntry};

    fn test_catalog(n: usize) -> Catalog {
        let entries = (0..n)
            .map(|i| {
                WordEntry::new(&format!("palabra{}", i), &format!("word{}", i), PartOfSpeech::Noun)
            })
            .collect();
        Catalog::from_entries(entries)
    }

    fn test_storage() -> (tempfile::TempDir, ProgressStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = ProgressStorage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_queue_pointer() {
        let mut queue = StudyQueue::new(vec!["a".into(), "b".into()], false);
        assert_eq!(queue.current(), Some("a"));
        assert_eq!(queue.remaining(), 2);

        queue.advance();
        assert_eq!(queue.current(), Some("b"));

        queue.advance();
        assert_eq!(queue.current(), None);
        assert_eq!(queue.remaining(), 0);

        // Advancing past the end stays put
        queue.advance();
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn test_due_queue_creates_missing_records() {
        let catalog = test_catalog(10);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();

        let ids = build_due_queue(&catalog, &storage, 5, &mut rng, now).unwrap();
        assert_eq!(ids.len(), 5);
        // Every catalog word got a persisted default record
        assert_eq!(storage.get_all().unwrap().len(), 10);
    }

    #[test]
    fn test_due_queue_only_returns_due_words() {
        let catalog = test_catalog(6);
        let (_dir, storage) = test_storage();
        let now = Utc::now();

        // Three words scheduled into the future, three overdue
        for (i, entry) in catalog.entries().iter().enumerate() {
            let mut record = WordProgress::new(&entry.id, now);
            record.due_at = if i < 3 {
                now + Duration::days(2)
            } else {
                now - Duration::hours(1)
            };
            storage.put(&record).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(7);
        let ids = build_due_queue(&catalog, &storage, 20, &mut rng, now).unwrap();
        assert_eq!(ids.len(), 3);
        for id in &ids {
            let record = storage.get(id).unwrap().unwrap();
            assert!(record.due_at <= now);
        }
    }

    #[test]
    fn test_due_queue_truncates_to_limit() {
        let catalog = test_catalog(50);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(3);

        let ids = build_due_queue(&catalog, &storage, 20, &mut rng, Utc::now()).unwrap();
        assert_eq!(ids.len(), 20);

        let distinct: HashSet<&String> = ids.iter().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn test_any_queue_distinct_and_sized() {
        let catalog = test_catalog(30);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(11);

        let ids = build_any_queue(&catalog, &storage, 20, &mut rng, Utc::now()).unwrap();
        assert_eq!(ids.len(), 20);
        let distinct: HashSet<&String> = ids.iter().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn test_any_queue_smaller_catalog_returns_all() {
        let catalog = test_catalog(8);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(11);

        let ids = build_any_queue(&catalog, &storage, 20, &mut rng, Utc::now()).unwrap();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_any_queue_does_not_persist() {
        let catalog = test_catalog(10);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(11);

        build_any_queue(&catalog, &storage, 5, &mut rng, Utc::now()).unwrap();
        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_any_queue_prefers_earlier_due_words() {
        // More catalog words than the pool admits: the latest-due words
        // must never be sampled.
        let catalog = test_catalog(ANY_QUEUE_POOL + 50);
        let (_dir, storage) = test_storage();
        let now = Utc::now();

        // Push the last 50 words far into the future
        let far: Vec<WordProgress> = catalog.entries()[ANY_QUEUE_POOL..]
            .iter()
            .map(|entry| {
                let mut record = WordProgress::new(&entry.id, now);
                record.due_at = now + Duration::days(365);
                record
            })
            .collect();
        storage.put_many(&far).unwrap();

        let excluded: HashSet<&str> = catalog.entries()[ANY_QUEUE_POOL..]
            .iter()
            .map(|e| e.id.as_str())
            .collect();

        let mut rng = StdRng::seed_from_u64(5);
        let ids = build_any_queue(&catalog, &storage, 100, &mut rng, now).unwrap();
        assert_eq!(ids.len(), 100);
        for id in &ids {
            assert!(!excluded.contains(id.as_str()));
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_queues() {
        let catalog = test_catalog(0);
        let (_dir, storage) = test_storage();
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();

        assert!(build_due_queue(&catalog, &storage, 20, &mut rng, now)
            .unwrap()
            .is_empty());
        assert!(build_any_queue(&catalog, &storage, 20, &mut rng, now)
            .unwrap()
            .is_empty());
    }
}
