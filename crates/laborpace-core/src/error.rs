//! Error types for laborpace-core.
//!
//! State-machine violations surface to the caller unchanged and leave no
//! state modified. Storage reads self-heal to defaults inside the storage
//! layer; only writes propagate a [`StorageError`].

use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Operation invalid for the recorder's or scheduler's current state
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Persistence errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An operation was requested in a state that cannot accept it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `start` while a contraction is already being timed
    #[error("a contraction is already being recorded")]
    AlreadyRecording,

    /// `stop` with no contraction in progress
    #[error("no contraction is being recorded")]
    NotRecording,

    /// `clear` would silently discard an in-progress timing
    #[error("cannot clear history while a contraction is being recorded")]
    ClearWhileRecording,

    /// A record would break the history's chronological ordering
    #[error("record starts at {start_ms} before the previous record ends at {end_ms}")]
    OutOfOrder { start_ms: u64, end_ms: u64 },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// Failed to encode a value for the kv store
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
