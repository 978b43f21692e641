//! Error type shared by the occupancy engine and its repository boundary

use super::conflicts::ConflictingOccupation;
use std::fmt::Write;

/// Errors produced by the checker, the booking writer and dataset loading
#[derive(Debug, thiserror::Error)]
pub enum OccupancyError {
    /// A booking collides with existing occupations
    #[error("{}", describe_conflict(.0))]
    Conflict(Vec<ConflictingOccupation>),

    /// A referenced entity does not exist
    #[error("{kind} not found: '{id}'")]
    NotFound {
        /// Entity kind ("classroom", "occupation", ...)
        kind: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Caller input failed validation (empty week set, missing identifier, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A dataset row is inconsistent (dangling reference, bad time, ...)
    #[error("invalid dataset: {0}")]
    Dataset(String),

    /// Reading a dataset or report file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset file is not valid TOML for the expected schema
    #[error("failed to parse dataset: {0}")]
    Toml(#[from] toml::de::Error),
}

impl OccupancyError {
    /// Shorthand for [`OccupancyError::NotFound`]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

fn describe_conflict(conflicts: &[ConflictingOccupation]) -> String {
    let mut out = format!("booking conflicts with {} occupation(s)", conflicts.len());
    for conflict in conflicts {
        let _ = write!(out, "; {}", conflict.message());
    }
    out
}
