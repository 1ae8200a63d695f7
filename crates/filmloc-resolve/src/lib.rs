//! filmloc resolve: tiered resolution of location strings.
//!
//! Tiers are tried strongest first: exact address, fuzzy address, landmark
//! (exact then fuzzy). Anything left is `unmatched`, which is a normal
//! outcome rather than an error.

pub mod engine;
pub mod types;

pub use engine::MatchEngine;
pub use types::*;
