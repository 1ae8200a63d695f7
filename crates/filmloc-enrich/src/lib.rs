//! filmloc enrich: joins geocodes and movie metadata onto location
//! records to produce the final dataset rows.

pub mod enricher;
pub mod metadata;
pub mod types;

pub use enricher::Enricher;
pub use metadata::{MetadataLoadReport, MetadataTable, MovieMetadata, RawMetadataRow};
pub use types::*;
