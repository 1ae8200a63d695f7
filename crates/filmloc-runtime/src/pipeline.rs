//! Pipeline runner: load, index, resolve, enrich, all in one process.

use chrono::Utc;
use tracing::{info, warn};

use filmloc_core::{PipelineConfig, Result};
use filmloc_enrich::{Enricher, MetadataTable};
use filmloc_index::{AddressIndex, LandmarkIndex};
use filmloc_ingest::{load_locations, CorpusLoader};
use filmloc_resolve::{MatchEngine, TierCounts};

use crate::types::*;

/// Runs the batch transformation over one set of inputs.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Pipeline configured: address={}@{}, landmark={}@{}, parallel={}",
            config.matching.address.scorer,
            config.matching.address.threshold,
            config.matching.landmark.scorer,
            config.matching.landmark.threshold,
            config.parallel
        );
        Ok(Self { config })
    }

    /// Defaults with `FILMLOC_*` environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::new(PipelineConfig::from_env()?)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage. Fails only when a corpus loads to zero entries;
    /// malformed rows are counted in the report and skipped.
    pub fn run(&self, input: &PipelineInput) -> Result<PipelineOutput> {
        let started_at = Utc::now();
        let start = std::time::Instant::now();

        let addresses = CorpusLoader::load_addresses(&input.addresses);
        let landmarks = CorpusLoader::load_landmarks(&input.landmarks);
        let address_fingerprint = addresses.fingerprint();
        let landmark_fingerprint = landmarks.fingerprint();
        let address_load = addresses.report.clone();
        let landmark_load = landmarks.report.clone();

        let address_index = AddressIndex::build(addresses)?;
        let landmark_index = LandmarkIndex::build(landmarks)?;

        let locations = load_locations(&input.locations);
        let engine = MatchEngine::new(&address_index, &landmark_index, self.config.matching)?;
        let results = engine.resolve_all(&locations.records, self.config.parallel);

        let metadata = MetadataTable::from_rows(&input.metadata);
        let enricher = Enricher::new(&metadata);
        let (records, enrichment) = enricher.enrich_all(locations.records.iter().zip(results.iter()));

        let tiers = TierCounts::tally(&results);
        let matched_ratio = tiers.matched_ratio();
        let meets_acceptance = matched_ratio >= self.config.acceptance_match_ratio;
        if !meets_acceptance {
            warn!(
                "Matched ratio {:.3} is below the acceptance target {:.3} ({} of {} unmatched)",
                matched_ratio,
                self.config.acceptance_match_ratio,
                tiers.unmatched,
                tiers.total()
            );
        }

        let report = RunReport {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            address_corpus: CorpusSummary {
                load: address_load,
                index: address_index.stats(),
                fingerprint: address_fingerprint,
            },
            landmark_corpus: CorpusSummary {
                load: landmark_load,
                index: landmark_index.stats(),
                fingerprint: landmark_fingerprint,
            },
            locations_rejected: locations.rejected,
            tiers,
            matched_ratio,
            meets_acceptance,
            metadata: metadata.report().clone(),
            enrichment,
        };

        info!(
            "Pipeline complete: {} records, matched={:.1}%, duration={}ms",
            records.len(),
            matched_ratio * 100.0,
            report.duration_ms
        );

        Ok(PipelineOutput { records, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmloc_core::{Error, MatchTier};
    use serde_json::json;

    fn input() -> PipelineInput {
        serde_json::from_value(json!({
            "addresses": [
                {"address": "600 OCTAVIA ST", "latitude": "37.776", "longitude": "-122.423", "nhood": "Hayes Valley"},
                {"address": "1101 CALIFORNIA ST", "latitude": "37.792", "longitude": "-122.413", "nhood": "Nob Hill"},
                {"address": "1 THE EMBARCADERO", "latitude": "37.794", "longitude": "-122.394", "nhood": "Financial District/South Beach"},
                {"address": "20 POLK ST", "latitude": "not-a-number", "longitude": "-122.418", "nhood": "Civic Center"}
            ],
            "landmarks": [
                {"Landmark Name": "Ferry Building", "latitude": 37.7955, "longitude": -122.3937},
                {"Landmark Name": "California St", "latitude": 37.793, "longitude": -122.41},
                {"Landmark Name": "Coit Tower", "Address": "1 Telegraph Hill Blvd", "latitude": 37.8024, "longitude": -122.4058}
            ],
            "locations": [
                {"locations": "600 octavia street", "title": "Vertigo", "release_year": "1958"},
                {"locations": "ferry building", "title": "Bullitt", "release_year": "1968"},
                {"locations": "financial district", "title": "Bullitt", "release_year": "1968"},
                {"locations": "1100 California Street", "title": "Vertigo", "release_year": "1958"},
                {"locations": "Coit Tower", "title": "The Rock", "release_year": "1996"},
                {"locations": "1 Embarcadero", "title": "Milk", "release_year": 2008},
                {"title": "No Location"}
            ],
            "metadata": [
                {"Title": "Vertigo", "Genre": "Mystery, Romance, Thriller", "imdbRating": "8.3", "Plot": "A detective...", "Poster": "https://example.org/v.jpg", "searched_title": "Vertigo"},
                {"Response": "False", "Error": "Movie not found!", "searched_title": "Bullitt"},
                {"Title": "Milk", "Genre": "Biography, Drama", "searched_title": "Milk"}
            ]
        }))
        .unwrap()
    }

    fn run(config: PipelineConfig) -> PipelineOutput {
        Pipeline::new(config).unwrap().run(&input()).unwrap()
    }

    fn find<'a>(out: &'a PipelineOutput, location: &str) -> &'a filmloc_enrich::EnrichedRecord {
        out.records
            .iter()
            .find(|r| r.raw_location == location)
            .unwrap()
    }

    #[test]
    fn test_octavia_street_resolves() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "600 octavia street");
        assert!(matches!(rec.match_tier, MatchTier::Exact | MatchTier::Fuzzy));
        assert!(rec.match_score.unwrap() >= 0.85);
        assert_eq!(rec.latitude, Some(37.776));
        assert_eq!(rec.longitude, Some(-122.423));
        assert_eq!(rec.neighborhood.as_deref(), Some("Hayes Valley"));
    }

    #[test]
    fn test_ferry_building_is_landmark() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "ferry building");
        assert_eq!(rec.match_tier, MatchTier::Landmark);
        assert_eq!(rec.match_score, Some(1.0));
        assert_eq!(rec.latitude, Some(37.7955));
        assert_eq!(rec.longitude, Some(-122.3937));
    }

    #[test]
    fn test_financial_district_unmatched() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "financial district");
        assert_eq!(rec.match_tier, MatchTier::Unmatched);
        assert!(rec.matched_address.is_none());
        assert!(rec.latitude.is_none() && rec.longitude.is_none());
        assert!(rec.neighborhood.is_none());
    }

    #[test]
    fn test_title_without_metadata_kept() {
        let out = run(PipelineConfig::default());
        let bullitt: Vec<_> = out.records.iter().filter(|r| r.title == "Bullitt").collect();
        assert_eq!(bullitt.len(), 2);
        for rec in bullitt {
            assert!(rec.genre.is_none());
            assert!(rec.rating.is_none());
            assert!(rec.plot.is_none());
            assert!(rec.poster_url.is_none());
        }
        let vertigo = find(&out, "600 octavia street");
        assert_eq!(vertigo.genre.as_deref(), Some("Mystery, Romance, Thriller"));
        assert_eq!(vertigo.release_decade, Some(1950));
    }

    #[test]
    fn test_address_tier_wins_over_landmark() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "1100 California Street");
        assert_eq!(rec.match_tier, MatchTier::Fuzzy);
        assert_eq!(rec.matched_address.as_deref(), Some("1101 california st"));
    }

    #[test]
    fn test_landmark_street_address_used() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "Coit Tower");
        assert_eq!(rec.match_tier, MatchTier::Landmark);
        assert_eq!(rec.matched_address.as_deref(), Some("1 telegraph hill blvd"));
    }

    #[test]
    fn test_embarcadero_alias() {
        let out = run(PipelineConfig::default());
        let rec = find(&out, "1 Embarcadero");
        assert_eq!(rec.match_tier, MatchTier::Exact);
        assert_eq!(rec.matched_address.as_deref(), Some("1 the embarcadero"));
    }

    #[test]
    fn test_corpus_spelling_resolves_exactly() {
        let mut spelled = input();
        spelled.locations = spelled
            .addresses
            .iter()
            .filter_map(|row| filmloc_ingest::CorpusLoader::address_entry(0, row).ok())
            .map(|entry| filmloc_ingest::RawLocationRow {
                raw_location: Some(entry.address.to_uppercase()),
                title: Some("Vertigo".into()),
                year: None,
            })
            .collect();
        assert_eq!(spelled.locations.len(), 3);

        let out = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&spelled)
            .unwrap();
        for rec in &out.records {
            assert_eq!(rec.match_tier, MatchTier::Exact, "{:?}", rec.raw_location);
            assert_eq!(rec.match_score, Some(1.0));
        }
        let embarcadero = find(&out, "1 THE EMBARCADERO");
        assert_eq!(embarcadero.latitude, Some(37.794));
    }

    #[test]
    fn test_input_from_json() {
        let input = PipelineInput::from_json(r#"{"locations": [{"locations": "Coit Tower", "title": "Vertigo"}]}"#)
            .unwrap();
        assert_eq!(input.locations.len(), 1);
        assert!(input.addresses.is_empty());

        let err = PipelineInput::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_enrichment_totality() {
        let out = run(PipelineConfig::default());
        // Six valid location rows, one rejected.
        assert_eq!(out.records.len(), 6);
        assert_eq!(out.report.locations_rejected, 1);
        for rec in &out.records {
            assert!(!rec.raw_location.is_empty());
            assert!(!rec.title.is_empty());
            let unmatched = rec.match_tier == MatchTier::Unmatched;
            assert_eq!(rec.latitude.is_none(), unmatched);
            assert_eq!(rec.longitude.is_none(), unmatched);
            assert_eq!(rec.matched_address.is_none(), unmatched);
        }
    }

    #[test]
    fn test_report() {
        let out = run(PipelineConfig::default());
        let report = &out.report;
        assert_eq!(report.address_corpus.load.loaded, 3);
        assert_eq!(report.address_corpus.load.rejected, 1);
        assert_eq!(report.landmark_corpus.load.loaded, 3);
        assert_eq!(report.tiers.total(), 6);
        assert_eq!(report.tiers.unmatched, 1);
        assert_eq!(report.metadata.failed_lookups, 1);
        assert!(!report.meets_acceptance);
        assert_eq!(report.address_corpus.fingerprint.len(), 64);

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["tiers"]["unmatched"], 1);
    }

    #[test]
    fn test_deterministic_across_order_and_parallelism() {
        let sequential = run(PipelineConfig {
            parallel: false,
            ..PipelineConfig::default()
        });

        let mut shuffled = input();
        shuffled.locations.reverse();
        let parallel = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&shuffled)
            .unwrap();

        for rec in &sequential.records {
            let other = parallel
                .records
                .iter()
                .find(|r| r.raw_location == rec.raw_location)
                .unwrap();
            assert_eq!(rec, other);
        }
        assert_eq!(
            sequential.report.address_corpus.fingerprint,
            parallel.report.address_corpus.fingerprint
        );
    }

    #[test]
    fn test_empty_address_corpus_is_fatal() {
        let mut bad = input();
        bad.addresses.clear();
        let err = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&bad)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            acceptance_match_ratio: 2.0,
            ..PipelineConfig::default()
        };
        assert!(Pipeline::new(config).is_err());
    }
}
