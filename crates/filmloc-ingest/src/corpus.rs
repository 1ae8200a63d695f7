//! Reference corpus loading: raw rows → normalized, de-duplicated entries.
//!
//! Malformed rows are skipped and counted. When two rows normalize to the
//! same key the first one seen wins; later ones are counted as duplicates.

use std::collections::HashSet;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use filmloc_core::{AddressEntry, Error, LandmarkEntry, Result, RowKind};

use crate::normalize::normalize;
use crate::rows::{present, RawAddressRow, RawLandmarkRow, RawNumber};

/// Counters for one corpus load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub kind: RowKind,
    #[serde(rename = "rowsSeen")]
    pub rows_seen: usize,
    pub loaded: usize,
    pub rejected: usize,
    #[serde(rename = "duplicatesSkipped")]
    pub duplicates_skipped: usize,
}

impl LoadReport {
    fn new(kind: RowKind) -> Self {
        Self {
            kind,
            rows_seen: 0,
            loaded: 0,
            rejected: 0,
            duplicates_skipped: 0,
        }
    }
}

/// Entries that can be addressed by a normalized key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for AddressEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for LandmarkEntry {
    fn key(&self) -> &str {
        &self.key
    }
}

/// A loaded corpus in first-seen order.
#[derive(Debug, Clone)]
pub struct Corpus<T> {
    pub entries: Vec<T>,
    pub report: LoadReport,
}

impl<T: Keyed> Corpus<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 over the ordered normalized keys. Two loads with the same
    /// fingerprint resolve queries identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in &self.entries {
            hasher.update(entry.key().as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

/// Builds the address and landmark corpora from raw rows.
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn load_addresses(rows: &[RawAddressRow]) -> Corpus<AddressEntry> {
        let corpus = Self::load(RowKind::Address, rows, Self::address_entry);
        info!(
            "Address corpus: {} loaded, {} rejected, {} duplicate keys",
            corpus.report.loaded, corpus.report.rejected, corpus.report.duplicates_skipped
        );
        corpus
    }

    pub fn load_landmarks(rows: &[RawLandmarkRow]) -> Corpus<LandmarkEntry> {
        let corpus = Self::load(RowKind::Landmark, rows, Self::landmark_entry);
        info!(
            "Landmark corpus: {} loaded, {} rejected, {} duplicate keys",
            corpus.report.loaded, corpus.report.rejected, corpus.report.duplicates_skipped
        );
        corpus
    }

    fn load<R, T: Keyed>(
        kind: RowKind,
        rows: &[R],
        build: impl Fn(usize, &R) -> Result<T>,
    ) -> Corpus<T> {
        let mut report = LoadReport::new(kind);
        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
        let mut entries = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            report.rows_seen += 1;
            let entry = match build(idx, row) {
                Ok(e) => e,
                Err(e) => {
                    debug!("{}", e);
                    report.rejected += 1;
                    continue;
                }
            };
            if !seen.insert(entry.key().to_string()) {
                debug!("Duplicate {} key {:?} at row {}, keeping first", kind, entry.key(), idx);
                report.duplicates_skipped += 1;
                continue;
            }
            entries.push(entry);
        }

        report.loaded = entries.len();
        Corpus { entries, report }
    }

    /// Validate one address row.
    pub fn address_entry(row_index: usize, row: &RawAddressRow) -> Result<AddressEntry> {
        let kind = RowKind::Address;
        let address = present(&row.address)
            .ok_or_else(|| Error::malformed(kind, row_index, "missing address"))?
            .to_lowercase();
        let key = normalize(&address);
        if key.is_empty() {
            return Err(Error::malformed(kind, row_index, "address normalizes to nothing"));
        }
        let latitude = coordinate(kind, row_index, "latitude", &row.latitude)?;
        let longitude = coordinate(kind, row_index, "longitude", &row.longitude)?;
        let neighborhood = present(&row.neighborhood)
            .ok_or_else(|| Error::malformed(kind, row_index, "missing neighborhood"))?
            .to_string();

        Ok(AddressEntry {
            key,
            address,
            latitude,
            longitude,
            neighborhood,
        })
    }

    /// Validate one landmark row.
    pub fn landmark_entry(row_index: usize, row: &RawLandmarkRow) -> Result<LandmarkEntry> {
        let kind = RowKind::Landmark;
        let name = present(&row.name)
            .ok_or_else(|| Error::malformed(kind, row_index, "missing name"))?
            .to_lowercase();
        let key = normalize(&name);
        if key.is_empty() {
            return Err(Error::malformed(kind, row_index, "name normalizes to nothing"));
        }
        let latitude = coordinate(kind, row_index, "latitude", &row.latitude)?;
        let longitude = coordinate(kind, row_index, "longitude", &row.longitude)?;

        Ok(LandmarkEntry {
            key,
            name,
            address: present(&row.address).map(str::to_lowercase),
            latitude,
            longitude,
            neighborhood: present(&row.neighborhood).map(str::to_string),
        })
    }
}

fn coordinate(
    kind: RowKind,
    row_index: usize,
    field: &str,
    value: &Option<RawNumber>,
) -> Result<f64> {
    match value {
        None => Err(Error::malformed(kind, row_index, format!("missing {}", field))),
        Some(raw) => raw.to_f64().ok_or_else(|| {
            Error::malformed(kind, row_index, format!("{} is not numeric: {:?}", field, raw))
        }),
    }
}
