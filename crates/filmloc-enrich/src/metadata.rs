//! Per-title movie metadata, keyed by normalized title.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use filmloc_ingest::normalize_title;

/// Metadata row in the shape returned by the movie-metadata API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadataRow {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    /// Title the lookup was issued for; preferred as the join key.
    #[serde(default)]
    pub searched_title: Option<String>,
    #[serde(default, alias = "Genre")]
    pub genre: Option<String>,
    #[serde(default, alias = "imdbRating")]
    pub rating: Option<String>,
    #[serde(default, alias = "Plot")]
    pub plot: Option<String>,
    #[serde(default, alias = "Poster")]
    pub poster_url: Option<String>,
    /// Set by the API when the lookup failed.
    #[serde(default, alias = "Error")]
    pub error: Option<String>,
}

/// Metadata fields attached to an enriched record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
}

impl MovieMetadata {
    fn from_row(row: &RawMetadataRow) -> Self {
        Self {
            genre: field(&row.genre),
            rating: field(&row.rating),
            plot: field(&row.plot),
            poster_url: field(&row.poster_url),
        }
    }
}

/// The API writes "N/A" for fields it has no value for.
fn field(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "N/A")
        .map(str::to_string)
}

/// Counters for one metadata load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataLoadReport {
    #[serde(rename = "rowsSeen")]
    pub rows_seen: usize,
    pub loaded: usize,
    #[serde(rename = "failedLookups")]
    pub failed_lookups: usize,
    pub rejected: usize,
    #[serde(rename = "duplicatesSkipped")]
    pub duplicates_skipped: usize,
}

/// Exact-key title lookup.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    by_title: HashMap<String, MovieMetadata>,
    report: MetadataLoadReport,
}

impl MetadataTable {
    /// Build from raw rows. Failed lookups and rows with no title are
    /// skipped; a repeated title keeps its first row.
    pub fn from_rows(rows: &[RawMetadataRow]) -> Self {
        let mut report = MetadataLoadReport::default();
        let mut by_title = HashMap::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            report.rows_seen += 1;
            if row.error.is_some() {
                debug!("Skipping failed metadata lookup at row {}", idx);
                report.failed_lookups += 1;
                continue;
            }
            let Some(title) = field(&row.searched_title).or_else(|| field(&row.title)) else {
                debug!("Skipping metadata row {} with no title", idx);
                report.rejected += 1;
                continue;
            };
            let key = normalize_title(&title);
            if by_title.contains_key(&key) {
                report.duplicates_skipped += 1;
                continue;
            }
            by_title.insert(key, MovieMetadata::from_row(row));
        }

        report.loaded = by_title.len();
        info!(
            "Metadata: {} titles, {} failed lookups, {} rejected",
            report.loaded, report.failed_lookups, report.rejected
        );
        Self { by_title, report }
    }

    pub fn get(&self, title: &str) -> Option<&MovieMetadata> {
        self.by_title.get(&normalize_title(title))
    }

    pub fn report(&self) -> &MetadataLoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}
