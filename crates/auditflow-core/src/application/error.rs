//! Application layer errors.
//!
//! These represent orchestration and infrastructure failures. Business
//! rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorCategory;

/// Failure of a remote store call.
///
/// The pipeline treats every variant identically: log and continue on the
/// next tick. No retry/backoff, no transient-vs-permanent distinction.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// The store could not be reached (network/auth/quota).
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The store rejected the operation.
    #[error("store rejected operation on '{table}': {reason}")]
    Rejected { table: String, reason: String },

    /// A row failed to serialize or deserialize.
    #[error("serialization failed: {reason}")]
    Serialization { reason: String },

    /// Local I/O failure in a file-backed adapter.
    #[error("store I/O error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// An in-process lock was poisoned.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Skeleton rendering failed.
    #[error("Rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// User-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Store(e) => vec![
                format!("Remote store call failed: {e}"),
                "The next tick retries automatically when running the pipeline".into(),
                "Check the store identifiers in your configuration".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Store(_) | Self::FilesystemError { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}
