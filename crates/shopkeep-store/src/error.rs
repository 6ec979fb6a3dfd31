//! # Store Error Types
//!
//! Error types for reading and writing the item file.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error     CoreError (validation, lookup)  │
//! │       │                                      │                          │
//! │       ▼                                      ▼                          │
//! │  StoreError (this module) ← Adds the file path and categorization       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Exit code + message                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use shopkeep_core::{CoreError, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the file failed.
    ///
    /// ## When This Occurs
    /// - Permission denied on the data directory
    /// - Disk full during a save
    /// - The data path exists but is a directory
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid item array.
    #[error("Corrupt item file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded.
    #[error("Failed to encode items: {0}")]
    Encode(#[source] serde_json::Error),

    /// Another holder of the shared inventory panicked mid-write.
    #[error("Inventory lock poisoned")]
    LockPoisoned,

    /// Validation or lookup failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_to_store_error() {
        let err: StoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = StoreError::io(
            "data/items.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("data/items.json"));
    }
}
