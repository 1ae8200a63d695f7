//! Joins match results and title metadata onto location records.

use std::collections::BTreeSet;

use tracing::info;

use filmloc_core::LocationRecord;
use filmloc_resolve::MatchResult;

use crate::metadata::{MetadataTable, MovieMetadata};
use crate::types::{EnrichedRecord, EnrichmentReport};

/// Produces enriched records. Never drops a record.
pub struct Enricher<'a> {
    metadata: &'a MetadataTable,
}

impl<'a> Enricher<'a> {
    pub fn new(metadata: &'a MetadataTable) -> Self {
        Self { metadata }
    }

    /// First join: copy the geocode (if any) from the match result.
    pub fn join_geocode(record: &LocationRecord, result: &MatchResult) -> EnrichedRecord {
        let geocode = result.geocode();
        EnrichedRecord {
            raw_location: record.raw_location.clone(),
            title: record.title.clone(),
            year: record.year,
            release_decade: record.year.map(|y| y.div_euclid(10) * 10),
            matched_address: geocode.map(|g| g.matched_address.clone()),
            latitude: geocode.map(|g| g.latitude),
            longitude: geocode.map(|g| g.longitude),
            neighborhood: geocode.and_then(|g| g.neighborhood.clone()),
            match_tier: result.tier(),
            match_score: result.score(),
            genre: None,
            rating: None,
            plot: None,
            poster_url: None,
        }
    }

    /// Second join: exact normalized-title lookup. A miss leaves the
    /// metadata fields empty.
    pub fn join_metadata(&self, mut record: EnrichedRecord) -> EnrichedRecord {
        let MovieMetadata {
            genre,
            rating,
            plot,
            poster_url,
        } = self.metadata.get(&record.title).cloned().unwrap_or_default();
        record.genre = genre;
        record.rating = rating;
        record.plot = plot;
        record.poster_url = poster_url;
        record
    }

    pub fn enrich(&self, record: &LocationRecord, result: &MatchResult) -> EnrichedRecord {
        self.join_metadata(Self::join_geocode(record, result))
    }

    /// Enrich a batch of (record, result) pairs, keeping order.
    pub fn enrich_all<'r>(
        &self,
        resolved: impl IntoIterator<Item = (&'r LocationRecord, &'r MatchResult)>,
    ) -> (Vec<EnrichedRecord>, EnrichmentReport) {
        let mut report = EnrichmentReport::default();
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut enriched = Vec::new();

        for (record, result) in resolved {
            let out = self.enrich(record, result);
            report.records += 1;
            if out.has_geocode() {
                report.with_geocode += 1;
            }
            if out.neighborhood.is_some() {
                report.with_neighborhood += 1;
            }
            if self.metadata.get(&out.title).is_some() {
                report.with_metadata += 1;
            } else {
                missing.insert(out.title.clone());
            }
            enriched.push(out);
        }

        report.titles_without_metadata = missing.into_iter().collect();
        info!(
            "Enriched {} records: {} with geocode, {} with neighborhood, {} with metadata",
            report.records, report.with_geocode, report.with_neighborhood, report.with_metadata
        );
        (enriched, report)
    }
}
