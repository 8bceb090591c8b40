//! In-memory store backing both ports.
//!
//! One [`InMemoryStore`] serves as the row store *and* the analytics
//! store. A mirror mapping makes rows inserted into a row table visible
//! under its changelog table, modelling the managed changelog propagation
//! the pipeline polls against. Locks are never held across an await.

use std::{
    collections::HashMap,
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use auditflow_core::{
    application::{
        error::StoreError,
        ports::{AnalyticsStore, RowStore},
    },
    domain::{AuditRecord, LogEntry, TableRef},
};

/// Thread-safe in-memory store, cheap to clone.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
    /// row table (qualified) -> changelog table (qualified). Fixed at
    /// construction, read-only afterwards, so no lock is needed.
    mirrors: HashMap<String, String>,
}

#[derive(Default)]
struct Inner {
    rows: RwLock<HashMap<String, Vec<AuditRecord>>>,
    logs: RwLock<HashMap<String, Vec<LogEntry>>>,
    fail_appends: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror inserts into `row_table` under `changelog_table` as well, so
    /// the poller sees producer writes.
    pub fn with_mirror(mut self, row_table: &TableRef, changelog_table: &TableRef) -> Self {
        self.mirrors
            .insert(row_table.qualified(), changelog_table.qualified());
        self
    }

    /// Make every subsequent `append_log` fail (testing helper).
    pub fn fail_appends(&self, fail: bool) {
        self.inner.fail_appends.store(fail, Ordering::Relaxed);
    }

    /// Number of rows currently held for a table.
    pub fn row_count(&self, table: &TableRef) -> usize {
        self.inner
            .rows
            .read()
            .map(|rows| rows.get(&table.qualified()).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// All sink entries for a table, oldest first.
    pub fn log_entries(&self, table: &TableRef) -> Vec<LogEntry> {
        self.inner
            .logs
            .read()
            .map(|logs| logs.get(&table.qualified()).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn push_rows(&self, key: String, rows: &[AuditRecord]) -> Result<(), StoreError> {
        let mut tables = self.inner.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        tables.entry(key).or_default().extend_from_slice(rows);
        Ok(())
    }

    fn puids_of(&self, table: &TableRef) -> Result<Vec<String>, StoreError> {
        let tables = self.inner.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .get(&table.qualified())
            .map(|rows| rows.iter().map(|r| r.puid.clone()).collect())
            .unwrap_or_default())
    }

    fn drain_table(&self, table: &TableRef) -> Result<u64, StoreError> {
        let mut tables = self.inner.rows.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .remove(&table.qualified())
            .map(|rows| rows.len() as u64)
            .unwrap_or(0))
    }
}

#[async_trait]
impl RowStore for InMemoryStore {
    async fn insert_batch(&self, table: &TableRef, rows: &[AuditRecord]) -> Result<(), StoreError> {
        self.push_rows(table.qualified(), rows)?;

        if let Some(changelog) = self.mirrors.get(&table.qualified()) {
            self.push_rows(changelog.clone(), rows)?;
        }
        Ok(())
    }

    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError> {
        self.drain_table(table)
    }

    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError> {
        self.puids_of(table)
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryStore {
    async fn query_since(
        &self,
        table: &TableRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        let tables = self.inner.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut rows: Vec<AuditRecord> = tables
            .get(&table.qualified())
            .map(|rows| {
                rows.iter()
                    .filter(|r| r.timestamp > since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    async fn append_log(&self, table: &TableRef, entry: &LogEntry) -> Result<(), StoreError> {
        if self.inner.fail_appends.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable {
                reason: "append failure injected".into(),
            });
        }
        let mut logs = self.inner.logs.write().map_err(|_| StoreError::LockPoisoned)?;
        logs.entry(table.qualified()).or_default().push(entry.clone());
        Ok(())
    }

    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError> {
        // A table may hold rows, sink entries, or both.
        let rows = self.drain_table(table)?;
        let mut logs = self.inner.logs.write().map_err(|_| StoreError::LockPoisoned)?;
        let entries = logs
            .remove(&table.qualified())
            .map(|v| v.len() as u64)
            .unwrap_or(0);
        Ok(rows + entries)
    }

    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError> {
        self.puids_of(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> (TableRef, TableRef, TableRef) {
        (
            TableRef::new("inst.db", "audit_trail").unwrap(),
            TableRef::new("proj.ds", "audit_trail_changelog").unwrap(),
            TableRef::new("proj.ds", "showcase_log").unwrap(),
        )
    }

    #[tokio::test]
    async fn inserts_are_mirrored_into_the_changelog() {
        let (rows_t, changelog_t, _) = tables();
        let store = InMemoryStore::new().with_mirror(&rows_t, &changelog_t);
        let record = AuditRecord::synthetic("payment-service");

        store
            .insert_batch(&rows_t, std::slice::from_ref(&record))
            .await
            .unwrap();

        let since = record.timestamp - chrono::Duration::seconds(1);
        let seen = store.query_since(&changelog_t, since).await.unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].puid, record.puid);
    }

    #[tokio::test]
    async fn cloned_store_shares_rows_and_keeps_the_mirror() {
        let (rows_t, changelog_t, _) = tables();
        let store = InMemoryStore::new().with_mirror(&rows_t, &changelog_t);
        let clone = store.clone();

        let record = AuditRecord::synthetic("payment-service");
        clone
            .insert_batch(&rows_t, std::slice::from_ref(&record))
            .await
            .unwrap();

        // The clone's mirror fed the changelog storage shared with the
        // original handle.
        let since = record.timestamp - chrono::Duration::seconds(1);
        let seen = store.query_since(&changelog_t, since).await.unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn query_since_is_strictly_greater_than() {
        let (rows_t, _, _) = tables();
        let store = InMemoryStore::new();
        let record = AuditRecord::synthetic("payment-service");
        store
            .insert_batch(&rows_t, std::slice::from_ref(&record))
            .await
            .unwrap();

        // Equal timestamp is excluded: the bound is exclusive.
        let seen = store.query_since(&rows_t, record.timestamp).await.unwrap();
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn append_failure_is_injectable() {
        let (_, _, log_t) = tables();
        let store = InMemoryStore::new();
        store.fail_appends(true);

        let result = store.append_log(&log_t, &LogEntry::now("test", "x")).await;
        assert!(result.is_err());

        store.fail_appends(false);
        store.append_log(&log_t, &LogEntry::now("test", "x")).await.unwrap();
        assert_eq!(store.log_entries(&log_t).len(), 1);
    }

    #[tokio::test]
    async fn delete_all_reports_removed_count() {
        let (rows_t, _, _) = tables();
        let store = InMemoryStore::new();
        let batch = vec![
            AuditRecord::synthetic("a"),
            AuditRecord::synthetic("b"),
        ];
        store.insert_batch(&rows_t, &batch).await.unwrap();

        let removed = RowStore::delete_all(&store, &rows_t).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.row_count(&rows_t), 0);
    }
}
