//! Core domain layer.
//!
//! Pure business logic: records, the watermark cursor, skeleton templates,
//! and their validation rules. No I/O, no async, no external services —
//! those concerns live behind the ports in the application layer.

pub mod entities;
pub mod error;
pub mod value_objects;
pub mod watermark;

pub use entities::{
    record::{AuditRecord, LogEntry, parse_details},
    service_tree::{DirectoryToCreate, FileToWrite, ServiceTree, TreeEntry},
    skeleton::{DirSpec, FileSpec, RenderVars, ServiceDescriptor, SkeletonNode, SkeletonTemplate},
};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::TableRef;
pub use watermark::Watermark;
