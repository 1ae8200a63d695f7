//! Tiered match engine.
//!
//! Each location string is normalized once and then tried, in order:
//! 1. exact address key
//! 2. fuzzy address (address policy)
//! 3. exact landmark name, then fuzzy landmark (landmark policy)
//! 4. unmatched
//!
//! Addresses are always tried before landmarks. Every input yields exactly
//! one [`MatchResult`].

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info};

use filmloc_core::{LocationRecord, MatchConfig, Result};
use filmloc_index::{AddressIndex, LandmarkIndex};
use filmloc_ingest::normalize;

use crate::types::{MatchResult, TierCounts};

/// Resolves location strings against read-only address and landmark indexes.
pub struct MatchEngine<'a> {
    addresses: &'a AddressIndex,
    landmarks: &'a LandmarkIndex,
    config: MatchConfig,
}

impl<'a> MatchEngine<'a> {
    pub fn new(
        addresses: &'a AddressIndex,
        landmarks: &'a LandmarkIndex,
        config: MatchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            addresses,
            landmarks,
            config,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Resolve a raw, un-normalized location string.
    pub fn resolve(&self, raw_location: &str) -> MatchResult {
        self.resolve_key(&normalize(raw_location))
    }

    pub fn resolve_record(&self, record: &LocationRecord) -> MatchResult {
        self.resolve(&record.raw_location)
    }

    /// Resolve an already-normalized key.
    pub fn resolve_key(&self, key: &str) -> MatchResult {
        if key.is_empty() {
            return MatchResult::unmatched(key);
        }

        if let Some(entry) = self.addresses.exact(key) {
            return MatchResult::exact(key, entry);
        }

        if let Some(hit) = self.addresses.fuzzy(key, self.config.address) {
            debug!("Fuzzy address {:?} -> {:?} ({:.3})", key, hit.entry.key, hit.score);
            return MatchResult::fuzzy(key, hit.entry, hit.score);
        }

        if let Some(entry) = self.landmarks.exact(key) {
            return MatchResult::landmark(key, entry, 1.0);
        }

        if let Some(hit) = self.landmarks.fuzzy(key, self.config.landmark) {
            debug!("Fuzzy landmark {:?} -> {:?} ({:.3})", key, hit.entry.key, hit.score);
            return MatchResult::landmark(key, hit.entry, hit.score);
        }

        MatchResult::unmatched(key)
    }

    /// Resolve a batch, returning one result per record in input order.
    ///
    /// Each distinct normalized location is resolved once; with `parallel`
    /// the distinct keys are spread over the rayon pool. Results do not
    /// depend on record order or on `parallel`.
    pub fn resolve_all(&self, records: &[LocationRecord], parallel: bool) -> Vec<MatchResult> {
        let start = std::time::Instant::now();
        let keys: Vec<String> = records.iter().map(|r| normalize(&r.raw_location)).collect();

        let mut distinct: Vec<&str> = keys.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let resolved: HashMap<&str, MatchResult> = if parallel {
            distinct
                .par_iter()
                .map(|&key| (key, self.resolve_key(key)))
                .collect()
        } else {
            distinct
                .iter()
                .map(|&key| (key, self.resolve_key(key)))
                .collect()
        };

        let results: Vec<MatchResult> = keys
            .iter()
            .map(|key| {
                resolved
                    .get(key.as_str())
                    .cloned()
                    .unwrap_or_else(|| self.resolve_key(key))
            })
            .collect();

        let counts = TierCounts::tally(&results);
        info!(
            "Resolved {} records ({} distinct locations) in {}ms: exact={}, fuzzy={}, landmark={}, unmatched={}",
            results.len(),
            distinct.len(),
            start.elapsed().as_millis(),
            counts.exact,
            counts.fuzzy,
            counts.landmark,
            counts.unmatched
        );

        results
    }
}
