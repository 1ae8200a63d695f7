//! Runtime types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filmloc_enrich::{EnrichedRecord, EnrichmentReport, MetadataLoadReport, RawMetadataRow};
use filmloc_index::IndexStats;
use filmloc_ingest::{LoadReport, RawAddressRow, RawLandmarkRow, RawLocationRow};
use filmloc_core::Result;
use filmloc_resolve::TierCounts;

/// Raw tables handed over by the upstream fetchers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineInput {
    #[serde(default)]
    pub addresses: Vec<RawAddressRow>,
    #[serde(default)]
    pub landmarks: Vec<RawLandmarkRow>,
    #[serde(default)]
    pub locations: Vec<RawLocationRow>,
    #[serde(default)]
    pub metadata: Vec<RawMetadataRow>,
}

impl PipelineInput {
    /// Parse the four tables from one JSON document. Missing tables are empty.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Load counters and fingerprint for one corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    pub load: LoadReport,
    pub index: IndexStats,
    /// SHA-256 of the corpus's normalized keys in load order.
    pub fingerprint: String,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
    #[serde(rename = "addressCorpus")]
    pub address_corpus: CorpusSummary,
    #[serde(rename = "landmarkCorpus")]
    pub landmark_corpus: CorpusSummary,
    #[serde(rename = "locationsRejected")]
    pub locations_rejected: usize,
    pub tiers: TierCounts,
    #[serde(rename = "matchedRatio")]
    pub matched_ratio: f64,
    #[serde(rename = "meetsAcceptance")]
    pub meets_acceptance: bool,
    pub metadata: MetadataLoadReport,
    pub enrichment: EnrichmentReport,
}

/// Enriched rows plus the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub records: Vec<EnrichedRecord>,
    pub report: RunReport,
}
