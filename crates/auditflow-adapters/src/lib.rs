//! Infrastructure adapters for auditflow.
//!
//! This crate implements the ports defined in
//! `auditflow_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod service_templates;
pub mod store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SubstitutionRenderer;
pub use store::{InMemoryStore, JsonlStore};
