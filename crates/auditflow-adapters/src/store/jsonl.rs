//! JSONL file-backed store.
//!
//! A durable local stand-in for the managed stores: each table lives in
//! one append-only `<qualified-name>.jsonl` file under the data
//! directory, one serialized row per line. Same mirror behaviour as the
//! in-memory store so the poller sees producer writes across process
//! restarts.
//!
//! Files are small demo artifacts; reads load the whole file. Malformed
//! lines are logged and skipped rather than failing the poll.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::Write as _,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use auditflow_core::{
    application::{
        error::StoreError,
        ports::{AnalyticsStore, RowStore},
    },
    domain::{AuditRecord, LogEntry, TableRef},
};

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
    /// row table (qualified) -> changelog table (qualified)
    mirrors: HashMap<String, String>,
}

impl JsonlStore {
    /// Create a store under `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            dir,
            mirrors: HashMap::new(),
        })
    }

    /// Mirror inserts into `row_table` under `changelog_table` as well.
    pub fn with_mirror(mut self, row_table: &TableRef, changelog_table: &TableRef) -> Self {
        self.mirrors
            .insert(row_table.qualified(), changelog_table.qualified());
        self
    }

    fn table_path(&self, qualified: &str) -> PathBuf {
        self.dir.join(format!("{qualified}.jsonl"))
    }

    fn append_lines<T: Serialize>(&self, qualified: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.table_path(qualified);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;

        let mut buf = String::new();
        for item in items {
            let line = serde_json::to_string(item).map_err(|e| StoreError::Serialization {
                reason: e.to_string(),
            })?;
            buf.push_str(&line);
            buf.push('\n');
        }
        file.write_all(buf.as_bytes()).map_err(|e| io_error(&path, e))
    }

    fn read_lines<T: DeserializeOwned>(&self, qualified: &str) -> Result<Vec<T>, StoreError> {
        let path = self.table_path(qualified);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&path, e)),
        };

        let mut items = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(item) => items.push(item),
                Err(e) => warn!(
                    file = %path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping malformed row"
                ),
            }
        }
        Ok(items)
    }

    fn remove_table(&self, qualified: &str) -> Result<u64, StoreError> {
        let count = self.read_lines::<serde_json::Value>(qualified)?.len() as u64;
        let path = self.table_path(qualified);
        match fs::remove_file(&path) {
            Ok(()) => Ok(count),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[async_trait]
impl RowStore for JsonlStore {
    async fn insert_batch(&self, table: &TableRef, rows: &[AuditRecord]) -> Result<(), StoreError> {
        self.append_lines(&table.qualified(), rows)?;
        if let Some(changelog) = self.mirrors.get(&table.qualified()) {
            self.append_lines(changelog, rows)?;
        }
        Ok(())
    }

    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError> {
        self.remove_table(&table.qualified())
    }

    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError> {
        let rows: Vec<AuditRecord> = self.read_lines(&table.qualified())?;
        Ok(rows.into_iter().map(|r| r.puid).collect())
    }
}

#[async_trait]
impl AnalyticsStore for JsonlStore {
    async fn query_since(
        &self,
        table: &TableRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        let mut rows: Vec<AuditRecord> = self
            .read_lines(&table.qualified())?
            .into_iter()
            .filter(|r: &AuditRecord| r.timestamp > since)
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    async fn append_log(&self, table: &TableRef, entry: &LogEntry) -> Result<(), StoreError> {
        self.append_lines(&table.qualified(), std::slice::from_ref(entry))
    }

    async fn delete_all(&self, table: &TableRef) -> Result<u64, StoreError> {
        self.remove_table(&table.qualified())
    }

    async fn list_puids(&self, table: &TableRef) -> Result<Vec<String>, StoreError> {
        RowStore::list_puids(self, table).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> (TableRef, TableRef) {
        (
            TableRef::new("inst.db", "audit_trail").unwrap(),
            TableRef::new("proj.ds", "audit_trail_changelog").unwrap(),
        )
    }

    #[tokio::test]
    async fn rows_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let (rows_t, _) = tables();
        let record = AuditRecord::synthetic("payment-service");

        {
            let store = JsonlStore::open(dir.path()).unwrap();
            store
                .insert_batch(&rows_t, std::slice::from_ref(&record))
                .await
                .unwrap();
        }

        let store = JsonlStore::open(dir.path()).unwrap();
        let puids = RowStore::list_puids(&store, &rows_t).await.unwrap();
        assert_eq!(puids, vec![record.puid]);
    }

    #[tokio::test]
    async fn mirror_feeds_the_changelog_query() {
        let dir = tempfile::tempdir().unwrap();
        let (rows_t, changelog_t) = tables();
        let store = JsonlStore::open(dir.path())
            .unwrap()
            .with_mirror(&rows_t, &changelog_t);
        let record = AuditRecord::synthetic("payment-service");

        store
            .insert_batch(&rows_t, std::slice::from_ref(&record))
            .await
            .unwrap();

        let since = record.timestamp - chrono::Duration::seconds(1);
        let seen = store.query_since(&changelog_t, since).await.unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (rows_t, _) = tables();
        let store = JsonlStore::open(dir.path()).unwrap();
        let record = AuditRecord::synthetic("payment-service");
        store
            .insert_batch(&rows_t, std::slice::from_ref(&record))
            .await
            .unwrap();

        // Corrupt the file with a garbage line.
        let path = dir.path().join(format!("{}.jsonl", rows_t.qualified()));
        let mut existing = std::fs::read_to_string(&path).unwrap();
        existing.push_str("{ not json\n");
        std::fs::write(&path, existing).unwrap();

        let since = record.timestamp - chrono::Duration::seconds(1);
        let seen = store.query_since(&rows_t, since).await.unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn delete_all_counts_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let (rows_t, _) = tables();
        let store = JsonlStore::open(dir.path()).unwrap();
        store
            .insert_batch(
                &rows_t,
                &[AuditRecord::synthetic("a"), AuditRecord::synthetic("b")],
            )
            .await
            .unwrap();

        let removed = RowStore::delete_all(&store, &rows_t).await.unwrap();
        assert_eq!(removed, 2);

        let puids = RowStore::list_puids(&store, &rows_t).await.unwrap();
        assert!(puids.is_empty());
    }
}
