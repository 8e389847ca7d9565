//! Error types for timetable generation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Error raised by a data-access boundary implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind (e.g. "time slot").
        kind: &'static str,
        /// Record identifier.
        id: u32,
    },

    /// A record failed an integrity rule.
    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),

    /// IO error while loading or saving a snapshot.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for a generation run.
///
/// Every variant is converted into an error [`GenerationOutcome`](crate::GenerationOutcome)
/// by the generator; none escapes the public operation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input is insufficient to start the search (no subjects, no slots, ...).
    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GenerateError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
