//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shopkeep                               │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, CliError>                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Write failed? ─────── StoreError::Io ──────────┐  logged in detail,    │
//! │         │                                        │  shown generically    │
//! │         ▼                                        ▼                       │
//! │  Bad input? ────────── CoreError::Validation ── CliError ──► stderr     │
//! │         │                                        │          + exit code  │
//! │         ▼                                        │                       │
//! │  Unknown ID? ───────── CoreError::ItemNotFound ──┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as `{"code": "...", "message": "..."}`.

use std::process::ExitCode;

use serde::Serialize;
use shopkeep_core::CoreError;
use shopkeep_store::StoreError;

use crate::config::ConfigError;

/// Error returned from a command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each tied to a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No item with the requested ID (exit 3)
    NotFound,

    /// Input failed a field rule (exit 2)
    ValidationError,

    /// The item file could not be read or written (exit 4)
    StorageError,

    /// The environment holds an unusable setting (exit 5)
    ConfigError,

    /// Anything else (exit 1)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::StorageError => 4,
            ErrorCode::ConfigError => 5,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(id: u64) -> Self {
        CliError::new(ErrorCode::NotFound, format!("Item not found: {}", id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => CliError::not_found(id),
            CoreError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

/// Converts store errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => CliError::from(e),
            StoreError::Io { path, source } => {
                // Log the actual error but return a generic message
                tracing::error!(path = %path.display(), error = %source, "Item file I/O failed");
                CliError::new(ErrorCode::StorageError, "Could not access the item file")
            }
            StoreError::Corrupt { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "Item file is corrupt");
                CliError::new(ErrorCode::StorageError, "The item file is corrupt")
            }
            StoreError::Encode(e) => {
                tracing::error!(error = %e, "Encoding items failed");
                CliError::new(ErrorCode::StorageError, "Could not encode items")
            }
            StoreError::LockPoisoned => CliError::internal("Inventory lock poisoned"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Failed to render JSON: {}", err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(format!("Failed to write output: {}", err))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;
