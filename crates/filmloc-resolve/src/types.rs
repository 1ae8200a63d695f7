//! Match result types.

use serde::Serialize;

use filmloc_core::{AddressEntry, LandmarkEntry, MatchTier};

/// Coordinates and labels copied from the winning corpus entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geocode {
    /// Street address of the match (a landmark's name when it has none).
    pub matched_address: String,
    /// Normalized key of the matched entry.
    pub matched_key: String,
    pub latitude: f64,
    pub longitude: f64,
    pub neighborhood: Option<String>,
}

impl From<&AddressEntry> for Geocode {
    fn from(entry: &AddressEntry) -> Self {
        Self {
            matched_address: entry.address.clone(),
            matched_key: entry.key.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            neighborhood: Some(entry.neighborhood.clone()),
        }
    }
}

impl From<&LandmarkEntry> for Geocode {
    fn from(entry: &LandmarkEntry) -> Self {
        Self {
            matched_address: entry.address.clone().unwrap_or_else(|| entry.name.clone()),
            matched_key: entry.key.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            neighborhood: entry.neighborhood.clone(),
        }
    }
}

/// Outcome of resolving one location string.
///
/// Only constructible through the tier constructors, which keep the tier,
/// score and geocode consistent: `exact` always scores 1.0 and carries the
/// entry whose key equals the query key; `unmatched` carries neither score
/// nor geocode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    query_key: String,
    tier: MatchTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geocode: Option<Geocode>,
}

impl MatchResult {
    pub(crate) fn exact(query_key: &str, entry: &AddressEntry) -> Self {
        Self {
            query_key: query_key.to_string(),
            tier: MatchTier::Exact,
            score: Some(1.0),
            geocode: Some(entry.into()),
        }
    }

    pub(crate) fn fuzzy(query_key: &str, entry: &AddressEntry, score: f64) -> Self {
        Self {
            query_key: query_key.to_string(),
            tier: MatchTier::Fuzzy,
            score: Some(score),
            geocode: Some(entry.into()),
        }
    }

    pub(crate) fn landmark(query_key: &str, entry: &LandmarkEntry, score: f64) -> Self {
        Self {
            query_key: query_key.to_string(),
            tier: MatchTier::Landmark,
            score: Some(score),
            geocode: Some(entry.into()),
        }
    }

    pub(crate) fn unmatched(query_key: &str) -> Self {
        Self {
            query_key: query_key.to_string(),
            tier: MatchTier::Unmatched,
            score: None,
            geocode: None,
        }
    }

    /// Normalized form of the location string that was resolved.
    pub fn query_key(&self) -> &str {
        &self.query_key
    }

    pub fn tier(&self) -> MatchTier {
        self.tier
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn geocode(&self) -> Option<&Geocode> {
        self.geocode.as_ref()
    }

    pub fn is_matched(&self) -> bool {
        self.tier.is_matched()
    }
}

/// Per-tier result counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub exact: usize,
    pub fuzzy: usize,
    pub landmark: usize,
    pub unmatched: usize,
}

impl TierCounts {
    pub fn tally<'a>(results: impl IntoIterator<Item = &'a MatchResult>) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.add(result.tier());
        }
        counts
    }

    pub fn add(&mut self, tier: MatchTier) {
        match tier {
            MatchTier::Exact => self.exact += 1,
            MatchTier::Fuzzy => self.fuzzy += 1,
            MatchTier::Landmark => self.landmark += 1,
            MatchTier::Unmatched => self.unmatched += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.exact + self.fuzzy + self.landmark + self.unmatched
    }

    pub fn matched(&self) -> usize {
        self.total() - self.unmatched
    }

    /// Matched share of the batch; 0 for an empty batch.
    pub fn matched_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.matched() as f64 / n as f64,
        }
    }
}
