//! Matching policy and pipeline configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};

/// String similarity metric used by a fuzzy tier. All scores are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Edit similarity over whitespace tokens sorted alphabetically.
    TokenSort,
    /// Best edit similarity among the shared-token / remainder combinations.
    TokenSet,
    /// Plain normalized Levenshtein similarity.
    Levenshtein,
    /// Jaro-Winkler similarity.
    JaroWinkler,
}

impl std::fmt::Display for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenSort => write!(f, "token_sort"),
            Self::TokenSet => write!(f, "token_set"),
            Self::Levenshtein => write!(f, "levenshtein"),
            Self::JaroWinkler => write!(f, "jaro_winkler"),
        }
    }
}

impl FromStr for Scorer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "token_sort" => Ok(Self::TokenSort),
            "token_set" => Ok(Self::TokenSet),
            "levenshtein" => Ok(Self::Levenshtein),
            "jaro_winkler" => Ok(Self::JaroWinkler),
            other => Err(Error::Config(format!("unknown scorer: {}", other))),
        }
    }
}

/// Scorer and acceptance threshold for one fuzzy tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub scorer: Scorer,
    /// Minimum similarity (inclusive) a candidate needs to be accepted.
    pub threshold: f64,
}

impl TierPolicy {
    pub fn new(scorer: Scorer, threshold: f64) -> Self {
        Self { scorer, threshold }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::Config(format!(
                "{} threshold must be in [0, 1], got {}",
                name, self.threshold
            )));
        }
        Ok(())
    }
}

/// Policy for the tiered matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Fuzzy street-address tier. High threshold to keep short strings honest.
    pub address: TierPolicy,
    /// Fuzzy landmark tier, tuned for short proper-noun names.
    pub landmark: TierPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            address: TierPolicy::new(Scorer::TokenSort, 0.85),
            landmark: TierPolicy::new(Scorer::TokenSet, 0.90),
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.address.validate("address")?;
        self.landmark.validate("landmark")
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub matching: MatchConfig,
    /// Resolve distinct location keys on the rayon pool.
    pub parallel: bool,
    /// Matched share of records a run is expected to reach.
    pub acceptance_match_ratio: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            parallel: true,
            acceptance_match_ratio: 0.95,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `FILMLOC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `FILMLOC_*` key.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("FILMLOC_ADDRESS_SCORER") {
            config.matching.address.scorer = v.parse()?;
        }
        if let Some(v) = lookup("FILMLOC_ADDRESS_THRESHOLD") {
            config.matching.address.threshold = parse_f64("FILMLOC_ADDRESS_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("FILMLOC_LANDMARK_SCORER") {
            config.matching.landmark.scorer = v.parse()?;
        }
        if let Some(v) = lookup("FILMLOC_LANDMARK_THRESHOLD") {
            config.matching.landmark.threshold = parse_f64("FILMLOC_LANDMARK_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("FILMLOC_PARALLEL") {
            config.parallel = matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = lookup("FILMLOC_ACCEPTANCE_RATIO") {
            config.acceptance_match_ratio = parse_f64("FILMLOC_ACCEPTANCE_RATIO", &v)?;
        }

        config.validate()?;
        debug!("Pipeline config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        if !(0.0..=1.0).contains(&self.acceptance_match_ratio) {
            return Err(Error::Config(format!(
                "acceptance ratio must be in [0, 1], got {}",
                self.acceptance_match_ratio
            )));
        }
        Ok(())
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} is not a number: {:?}", key, value)))
}
