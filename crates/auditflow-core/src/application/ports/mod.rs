//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `auditflow-adapters` crate provides implementations.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::application::error::StoreError;
use crate::domain::{AuditRecord, LogEntry, RenderVars, ServiceTree, SkeletonTemplate, TableRef};
use crate::error::AuditflowResult;

/// Port for the transactional row store.
///
/// Implemented by:
/// - `auditflow_adapters::store::InMemoryStore` (tests, demos)
/// - `auditflow_adapters::store::JsonlStore` (durable local stand-in)
///
/// A real managed-service client would plug in here; the pipeline only
/// requires atomic single/multi-row batch inserts.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Insert a batch of rows atomically.
    async fn insert_batch(&self, table: &TableRef, rows: &[AuditRecord]) -> Result<(), StoreError>;

    /// Delete every row, returning how many were removed.
    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError>;

    /// List all PUIDs currently present (reconciliation support).
    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError>;
}

/// Port for the analytical columnar store.
///
/// Covers the two operations the pipeline needs: the parameterized
/// watermark query against the changelog table, and the append-only
/// streaming insert into the logging sink table.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Rows with `timestamp > since`, ascending by timestamp.
    async fn query_since(
        &self,
        table: &TableRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<AuditRecord>, StoreError>;

    /// Append one audit line to the sink table.
    async fn append_log(&self, table: &TableRef, entry: &LogEntry) -> Result<(), StoreError>;

    /// Delete every row, returning how many were removed.
    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError>;

    /// List all PUIDs currently present (reconciliation support).
    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError>;
}

/// Port for filesystem operations used by the scaffolder.
///
/// Implemented by:
/// - `auditflow_adapters::filesystem::LocalFilesystem` (production)
/// - `auditflow_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AuditflowResult<()>;

    /// Write content to a file, overwriting unconditionally.
    fn write_file(&self, path: &Path, content: &str) -> AuditflowResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a file back (used by determinism checks and tests).
    fn read_to_string(&self, path: &Path) -> AuditflowResult<String>;
}

/// Port for skeleton rendering.
///
/// Implemented by `auditflow_adapters::renderer::SubstitutionRenderer`.
pub trait SkeletonRenderer: Send + Sync {
    /// Render a skeleton into a service tree rooted at `output_root`.
    fn render(
        &self,
        template: &SkeletonTemplate,
        vars: &RenderVars,
        output_root: &Path,
    ) -> AuditflowResult<ServiceTree>;
}
