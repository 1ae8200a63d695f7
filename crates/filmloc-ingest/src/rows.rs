//! Raw tabular row shapes as supplied by upstream collaborators.
//!
//! Every field is optional here; required-ness is decided when a row is
//! turned into a validated record. Field aliases accept the open-data API's
//! column names (`nhood`, `locations`, `release_year`, ...).

use serde::{Deserialize, Serialize};

/// A numeric cell that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Finite float value, if the cell holds one.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Whole-number value (`1968`, `"1968"`, `1968.0`).
    pub fn to_i32(&self) -> Option<i32> {
        let value = self.to_f64()?;
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return None;
        }
        Some(value as i32)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Address Corpus row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAddressRow {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<RawNumber>,
    #[serde(default)]
    pub longitude: Option<RawNumber>,
    #[serde(default, alias = "nhood", alias = "analysis_neighborhood")]
    pub neighborhood: Option<String>,
}

/// Landmark Corpus row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLandmarkRow {
    #[serde(default, alias = "Landmark Name", alias = "landmark_name", alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Address")]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<RawNumber>,
    #[serde(default)]
    pub longitude: Option<RawNumber>,
    #[serde(default, alias = "nhood")]
    pub neighborhood: Option<String>,
}

/// Filming-location row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocationRow {
    #[serde(default, alias = "locations")]
    pub raw_location: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "release_year")]
    pub year: Option<RawNumber>,
}

/// Returns the trimmed text when it is present and non-blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_number_forms() {
        assert_eq!(RawNumber::from(37.776).to_f64(), Some(37.776));
        assert_eq!(RawNumber::from(" -122.423 ").to_f64(), Some(-122.423));
        assert_eq!(RawNumber::from("n/a").to_f64(), None);
        assert_eq!(RawNumber::from("NaN").to_f64(), None);
        assert_eq!(RawNumber::from("1968").to_i32(), Some(1968));
        assert_eq!(RawNumber::from(1968.0).to_i32(), Some(1968));
        assert_eq!(RawNumber::from(1968.5).to_i32(), None);
    }

    #[test]
    fn test_socrata_address_shape() {
        let row: RawAddressRow = serde_json::from_value(json!({
            "address": "600 OCTAVIA ST",
            "latitude": "37.776",
            "longitude": "-122.423",
            "nhood": "Hayes Valley",
            "street_name": "OCTAVIA"
        }))
        .unwrap();
        assert_eq!(row.address.as_deref(), Some("600 OCTAVIA ST"));
        assert_eq!(row.latitude.unwrap().to_f64(), Some(37.776));
        assert_eq!(row.neighborhood.as_deref(), Some("Hayes Valley"));
    }

    #[test]
    fn test_film_location_shape() {
        let row: RawLocationRow = serde_json::from_value(json!({
            "title": "Vertigo",
            "release_year": "1958",
            "locations": "Mission Dolores"
        }))
        .unwrap();
        assert_eq!(row.raw_location.as_deref(), Some("Mission Dolores"));
        assert_eq!(row.year.unwrap().to_i32(), Some(1958));
    }

    #[test]
    fn test_landmark_shape() {
        let row: RawLandmarkRow = serde_json::from_value(json!({
            "Landmark Name": "Ferry Building",
            "Address": "1 Ferry Building",
            "latitude": 37.7955,
            "longitude": -122.3937
        }))
        .unwrap();
        assert_eq!(row.name.as_deref(), Some("Ferry Building"));
        assert!(row.neighborhood.is_none());
    }

    #[test]
    fn test_present() {
        assert_eq!(present(&Some("  x ".into())), Some("x"));
        assert_eq!(present(&Some("   ".into())), None);
        assert_eq!(present(&None), None);
    }
}
