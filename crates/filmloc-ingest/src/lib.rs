//! filmloc ingest: normalizer, raw row shapes, reference corpus loading.

pub mod corpus;
pub mod locations;
pub mod normalize;
pub mod rows;

pub use corpus::{Corpus, CorpusLoader, Keyed, LoadReport};
pub use locations::{load_locations, location_record, LocationBatch};
pub use normalize::{normalize, normalize_title};
pub use rows::{RawAddressRow, RawLandmarkRow, RawLocationRow, RawNumber};
