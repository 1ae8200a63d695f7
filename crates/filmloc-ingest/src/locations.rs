//! Filming-location row validation.

use serde::Serialize;
use tracing::{debug, info};

use filmloc_core::{Error, LocationRecord, Result, RowKind};

use crate::rows::{present, RawLocationRow};

/// Validated location records plus the count of rows that were rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationBatch {
    pub records: Vec<LocationRecord>,
    pub rejected: usize,
}

/// Validate one location row. A row without a location string or a title
/// cannot become a record; an unreadable year is simply dropped.
pub fn location_record(row_index: usize, row: &RawLocationRow) -> Result<LocationRecord> {
    let raw_location = present(&row.raw_location)
        .ok_or_else(|| Error::malformed(RowKind::Location, row_index, "missing location"))?;
    let title = present(&row.title)
        .ok_or_else(|| Error::malformed(RowKind::Location, row_index, "missing title"))?;

    Ok(LocationRecord {
        raw_location: raw_location.to_string(),
        title: title.to_string(),
        year: row.year.as_ref().and_then(|y| y.to_i32()),
    })
}

/// Validate all location rows, keeping input order.
pub fn load_locations(rows: &[RawLocationRow]) -> LocationBatch {
    let mut batch = LocationBatch::default();
    for (idx, row) in rows.iter().enumerate() {
        match location_record(idx, row) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                debug!("{}", e);
                batch.rejected += 1;
            }
        }
    }
    info!(
        "Locations: {} records, {} rejected",
        batch.records.len(),
        batch.rejected
    );
    batch
}
