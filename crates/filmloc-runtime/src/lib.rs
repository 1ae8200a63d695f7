//! filmloc runtime: runs the whole batch (corpora, indexes, resolution,
//! enrichment) and builds the run report.
//!
//! Callers hand in raw tables as [`PipelineInput`] and get enriched rows
//! back. Fetching inputs and persisting outputs stay with the caller.

pub mod pipeline;
pub mod types;

pub use pipeline::Pipeline;
pub use types::*;
