//! filmloc index: exact and blocked fuzzy lookup over the address and
//! landmark corpora.

pub mod blocking;
pub mod index;
pub mod similarity;

pub use blocking::BlockingIndex;
pub use index::{AddressIndex, CorpusIndex, FuzzyHit, IndexStats, LandmarkIndex};
pub use similarity::{similarity, token_set_ratio, token_sort_ratio};
