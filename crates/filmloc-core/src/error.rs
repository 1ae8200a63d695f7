//! Error types for filmloc.

use thiserror::Error;

/// Which raw input table a rejected row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Address,
    Landmark,
    Location,
    Metadata,
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Landmark => write!(f, "landmark"),
            Self::Location => write!(f, "location"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// A structurally invalid input row. Skipped and counted, never fatal.
    #[error("Malformed {kind} row {row}: {reason}")]
    MalformedInputRow {
        kind: RowKind,
        row: usize,
        reason: String,
    },

    /// A reference corpus loaded to zero entries; no resolution is possible.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(kind: RowKind, row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInputRow {
            kind,
            row,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
