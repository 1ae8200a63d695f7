//! Exact and fuzzy lookup over one reference corpus.
//!
//! `exact` is a hash lookup on the normalized key. `fuzzy` scores the
//! entries the blocking index proposes first and falls back to a full scan
//! when none of them reaches the threshold. The best score at or above the
//! threshold wins; equal scores go to the entry loaded first.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, trace};

use filmloc_core::{AddressEntry, Error, LandmarkEntry, Result, RowKind, TierPolicy};
use filmloc_ingest::{Corpus, Keyed};

use crate::blocking::BlockingIndex;
use crate::similarity::similarity;

/// Best fuzzy candidate for a query.
#[derive(Debug, Clone)]
pub struct FuzzyHit<'a, T> {
    pub entry: &'a T,
    /// Position of the entry in corpus load order.
    pub position: usize,
    pub score: f64,
}

/// Index size information.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub kind: RowKind,
    pub entries: usize,
    #[serde(rename = "blockingBuckets")]
    pub blocking_buckets: usize,
}

/// Read-only lookup structure over one corpus.
#[derive(Debug)]
pub struct CorpusIndex<T> {
    kind: RowKind,
    entries: Vec<T>,
    exact: HashMap<String, usize>,
    blocking: BlockingIndex,
}

pub type AddressIndex = CorpusIndex<AddressEntry>;
pub type LandmarkIndex = CorpusIndex<LandmarkEntry>;

impl<T: Keyed> CorpusIndex<T> {
    /// Index a loaded corpus. An empty corpus is a fatal configuration error.
    pub fn build(corpus: Corpus<T>) -> Result<Self> {
        Self::from_entries(corpus.report.kind, corpus.entries)
    }

    /// Index entries whose keys are already normalized.
    ///
    /// Entries need not come from [`CorpusLoader`](filmloc_ingest::CorpusLoader),
    /// so repeated keys are checked again here: later entries with a key
    /// already seen are dropped.
    pub fn from_entries(kind: RowKind, entries: Vec<T>) -> Result<Self> {
        let mut exact = HashMap::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if exact.contains_key(entry.key()) {
                debug!("Dropping duplicate {} key {:?}", kind, entry.key());
                continue;
            }
            exact.insert(entry.key().to_string(), kept.len());
            kept.push(entry);
        }

        if kept.is_empty() {
            return Err(Error::EmptyCorpus(format!("{} corpus has no entries", kind)));
        }

        let blocking = BlockingIndex::build(kept.iter().map(|e| e.key()));
        info!(
            "Built {} index: {} entries, {} blocking buckets",
            kind,
            kept.len(),
            blocking.bucket_count()
        );

        Ok(Self {
            kind,
            entries: kept,
            exact,
            blocking,
        })
    }

    pub fn exact(&self, key: &str) -> Option<&T> {
        self.exact.get(key).map(|&i| &self.entries[i])
    }

    /// Best candidate scoring at least `policy.threshold`, if any.
    pub fn fuzzy(&self, key: &str, policy: TierPolicy) -> Option<FuzzyHit<'_, T>> {
        if key.is_empty() {
            return None;
        }
        let candidates = self.blocking.candidates(key);
        if !candidates.is_empty() && candidates.len() < self.entries.len() {
            if let Some(hit) = self.best_of(key, candidates.into_iter(), policy) {
                return Some(hit);
            }
        }
        trace!("No blocked {} candidate for {:?}, scanning all", self.kind, key);
        self.best_of(key, 0..self.entries.len(), policy)
    }

    fn best_of(
        &self,
        key: &str,
        positions: impl Iterator<Item = usize>,
        policy: TierPolicy,
    ) -> Option<FuzzyHit<'_, T>> {
        let mut best: Option<FuzzyHit<'_, T>> = None;
        for position in positions {
            let entry = &self.entries[position];
            let score = similarity(policy.scorer, key, entry.key());
            if score < policy.threshold {
                continue;
            }
            // Strictly greater: ties stay with the earlier position.
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(FuzzyHit {
                    entry,
                    position,
                    score,
                });
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            kind: self.kind,
            entries: self.entries.len(),
            blocking_buckets: self.blocking.bucket_count(),
        }
    }
}
