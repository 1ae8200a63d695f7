//! Enrichment output types.

use serde::{Deserialize, Serialize};

use filmloc_core::MatchTier;

/// A location record joined with its geocode and movie metadata.
///
/// Geocode fields are populated exactly when `match_tier` is not
/// `unmatched`. Metadata fields are always present and null when the title
/// had no metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub raw_location: String,
    pub title: String,
    pub year: Option<i32>,
    pub release_decade: Option<i32>,
    pub matched_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood: Option<String>,
    pub match_tier: MatchTier,
    pub match_score: Option<f64>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
}

impl EnrichedRecord {
    pub fn has_geocode(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Result of enriching a batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrichmentReport {
    pub records: usize,
    #[serde(rename = "withGeocode")]
    pub with_geocode: usize,
    #[serde(rename = "withNeighborhood")]
    pub with_neighborhood: usize,
    #[serde(rename = "withMetadata")]
    pub with_metadata: usize,
    /// Distinct titles with no metadata row, sorted.
    #[serde(rename = "titlesWithoutMetadata")]
    pub titles_without_metadata: Vec<String>,
}
