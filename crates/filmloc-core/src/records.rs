//! Validated records shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// One observed filming-location event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Free-text location as entered upstream, never blank.
    pub raw_location: String,
    pub title: String,
    pub year: Option<i32>,
}

/// One canonical street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressEntry {
    /// Normalized lookup key, unique within the address corpus.
    pub key: String,
    /// Address as it appeared in the corpus (lowercased).
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub neighborhood: String,
}

/// One named landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkEntry {
    /// Normalized name, unique within the landmark corpus.
    pub key: String,
    pub name: String,
    /// Street address of the landmark, when the source lists one.
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub neighborhood: Option<String>,
}

/// Strategy that produced a match, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Fuzzy,
    Landmark,
    Unmatched,
}

impl MatchTier {
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Landmark => write!(f, "landmark"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}
