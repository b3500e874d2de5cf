//! Study session flow and aggregate statistics

use chrono::Utc;
use log::{info, warn};
use rand::Rng;

use crate::catalog::{Catalog, WordEntry};
use crate::progress::storage::Result;
use crate::progress::{ProgressStorage, WordProgress, META_LAST_REVIEW_DAY, META_STREAK};
use crate::scheduler::{apply_grade, Grade};
use crate::streak::{advance_streak, day_string, parse_day, today};

use super::queue::{build_any_queue, build_due_queue, StudyQueue};

/// Default number of words per session; also the size of the mixed
/// fallback set when nothing is due
pub const FALLBACK_QUEUE_LEN: usize = 20;

/// One study session: a queue of word ids worked through in order.
/// Owns no storage; the caller keeps the catalog and store alive.
pub struct StudySession<'a> {
    catalog: &'a Catalog,
    storage: &'a ProgressStorage,
    queue: StudyQueue,
}

impl<'a> StudySession<'a> {
    /// Start a session: due words first, falling back to a mixed set of
    /// `FALLBACK_QUEUE_LEN` words when nothing is due. `queue().mixed`
    /// tells the surface which one the user is getting.
    pub fn start<R: Rng>(
        catalog: &'a Catalog,
        storage: &'a ProgressStorage,
        limit: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let now = Utc::now();
        let due = build_due_queue(catalog, storage, limit, rng, now)?;
        let queue = if due.is_empty() {
            info!("nothing due; building a mixed practice set");
            let any = build_any_queue(catalog, storage, FALLBACK_QUEUE_LEN, rng, now)?;
            StudyQueue::new(any, true)
        } else {
            StudyQueue::new(due, false)
        };
        Ok(Self {
            catalog,
            storage,
            queue,
        })
    }

    pub fn queue(&self) -> &StudyQueue {
        &self.queue
    }

    /// The catalog entry currently being studied
    pub fn current_entry(&self) -> Option<&WordEntry> {
        self.queue.current().and_then(|id| self.catalog.get(id))
    }

    /// Skip the current word without grading it
    pub fn skip(&mut self) {
        self.queue.advance();
    }

    /// Grade the current word and move on.
    ///
    /// Applies the scheduling update, persists the record, advances the
    /// streak meta, and returns the updated record. With no current word
    /// this is a no-op (guard against a desynced surface), not an error.
    pub fn grade_current(&mut self, grade: Grade) -> Result<Option<WordProgress>> {
        let id = match self.queue.current() {
            Some(id) => id.to_string(),
            None => {
                warn!("grade with no current word; ignoring");
                return Ok(None);
            }
        };

        let now = Utc::now();
        let record = self.storage.get_or_create(&id, now)?;
        let updated = apply_grade(&record, grade, now);
        self.storage.put(&updated)?;

        record_review_day(self.storage)?;
        self.queue.advance();
        Ok(Some(updated))
    }
}

/// Advance the streak meta for a review happening now, persisting the new
/// streak together with today's date.
pub fn record_review_day(storage: &ProgressStorage) -> Result<u32> {
    let today = today();
    let last_day = storage
        .get_meta(META_LAST_REVIEW_DAY)?
        .as_deref()
        .and_then(parse_day);
    let stored = storage
        .get_meta(META_STREAK)?
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let streak = advance_streak(last_day, stored, today);
    storage.set_meta(META_LAST_REVIEW_DAY, &day_string(today))?;
    storage.set_meta(META_STREAK, &streak.to_string())?;
    Ok(streak)
}

/// Aggregate counters for the stats surface
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_words: usize,
    pub due_count: usize,
    pub new_count: usize,
    pub total_reviews: u32,
    pub accuracy_pct: f32,
    pub learned_count: usize,
    pub streak: u32,
}

/// Scan the store and meta for the aggregate counts.
///
/// Words with no record yet count as new and due (the default record is
/// both); no records are created by this scan.
pub fn collect_stats(catalog: &Catalog, storage: &ProgressStorage) -> Result<Stats> {
    let records = storage.get_all_map()?;
    let now = Utc::now();

    let mut stats = Stats {
        total_words: catalog.len(),
        ..Stats::default()
    };
    let mut correct: u32 = 0;

    for entry in catalog.entries() {
        match records.get(&entry.id) {
            Some(record) => {
                if record.is_due(now) {
                    stats.due_count += 1;
                }
                if record.is_new() {
                    stats.new_count += 1;
                }
                if record.is_learned() {
                    stats.learned_count += 1;
                }
                stats.total_reviews += record.total;
                correct += record.correct;
            }
            None => {
                stats.due_count += 1;
                stats.new_count += 1;
            }
        }
    }

    if stats.total_reviews > 0 {
        stats.accuracy_pct = correct as f32 / stats.total_reviews as f32 * 100.0;
    }
    stats.streak = storage
        .get_meta(META_STREAK)?
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    Ok(stats)
}

/// Administrative full reset: wipe both partitions, then recreate a
/// default record for every current catalog entry.
pub fn full_reset(catalog: &Catalog, storage: &ProgressStorage) -> Result<()> {
    storage.clear()?;
    let now = Utc::now();
    let defaults: Vec<WordProgress> = catalog
        .entries()
        .iter()
        .map(|entry| WordProgress::new(&entry.id, now))
        .collect();
    storage.put_many(&defaults)?;
    info!("progress reset for {} words", defaults.len());
    Ok(())
}
