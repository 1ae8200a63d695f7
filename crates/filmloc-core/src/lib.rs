//! filmloc core: shared records, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod records;

pub use config::{MatchConfig, PipelineConfig, Scorer, TierPolicy};
pub use error::{Error, Result, RowKind};
pub use records::{AddressEntry, LandmarkEntry, LocationRecord, MatchTier};
