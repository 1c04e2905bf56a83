//! Error types for geocoin
//!
//! All modules use `GeocoinResult<T>` as their return type.

use crate::board::Cell;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for geocoin operations
pub type GeocoinResult<T> = Result<T, GeocoinError>;

/// All errors that can occur in geocoin
#[derive(Error, Debug)]
pub enum GeocoinError {
    // Persisted state errors
    #[error("Malformed persisted {what}: {reason}")]
    MalformedState { what: String, reason: String },

    #[error("Storage error for key {key}: {reason}")]
    Storage { key: String, reason: String },

    // Game errors
    #[error("No cache at cell {0} in the current neighborhood")]
    CacheNotActive(Cell),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl GeocoinError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed-state error
    pub fn malformed(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedState {
            what: what.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error for a key
    pub fn storage(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether the game can continue by treating the state as a first visit
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedState { .. } | Self::Storage { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheNotActive(_) => Some("Run: geocoin caches"),
            Self::MalformedState { .. } => Some("Run: geocoin reset"),
            Self::ConfigInvalid { .. } => Some("Run: geocoin config init --force"),
            _ => None,
        }
    }
}
