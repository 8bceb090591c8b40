//! Domain-level errors: validation failures in descriptors, skeletons,
//! and table references.

use thiserror::Error;

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid service descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid skeleton: {0}")]
    InvalidSkeleton(String),

    #[error("Skeleton '{id}' has no nodes")]
    EmptySkeleton { id: String },

    #[error("Duplicate path: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid table reference: {0}")]
    InvalidTableRef(String),

    #[error("Unknown skeleton template: {id}")]
    UnknownSkeleton { id: String },
}

impl DomainError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDescriptor(msg) => vec![
                format!("Descriptor problem: {msg}"),
                "Service names are kebab-case: payment-service, transaction-service".into(),
            ],
            Self::InvalidTableRef(msg) => vec![
                format!("Table reference problem: {msg}"),
                "Use 'namespace.table', e.g. sample-instance.audit-db.payment_audit_trail".into(),
            ],
            Self::UnknownSkeleton { id } => vec![
                format!("No built-in skeleton named '{id}'"),
                "Available skeletons: maven-service, spring-boot-service".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("The path '{path}' appears more than once"),
                "Skeleton paths must be unique after rendering".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownSkeleton { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
