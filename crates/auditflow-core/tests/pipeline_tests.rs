//! Integration tests for the insert-and-poll pipeline, run against small
//! in-process fake stores.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::watch;

use auditflow_core::{
    application::{
        error::StoreError,
        ports::{AnalyticsStore, RowStore},
        services::pipeline::{
            PipelineConfig, PipelineContext, poll_tick, producer_loop, producer_tick,
            run_pipeline,
        },
    },
    domain::{AuditRecord, LogEntry, TableRef, Watermark},
};

/// A paired row-store/analytics-store fake: producer writes are mirrored
/// into the changelog, like the original changelog propagation.
#[derive(Default)]
struct FakeStores {
    rows: Mutex<Vec<AuditRecord>>,
    changelog: Mutex<Vec<AuditRecord>>,
    logs: Mutex<Vec<LogEntry>>,
    fail_appends: AtomicBool,
    fail_queries: AtomicBool,
}

impl FakeStores {
    fn log_count(&self) -> usize {
        self.logs.lock().unwrap().len()
    }

    fn seed_changelog(&self, rows: Vec<AuditRecord>) {
        self.changelog.lock().unwrap().extend(rows);
    }
}

#[async_trait]
impl RowStore for FakeStores {
    async fn insert_batch(&self, _table: &TableRef, rows: &[AuditRecord]) -> Result<(), StoreError> {
        self.rows.lock().unwrap().extend_from_slice(rows);
        self.changelog.lock().unwrap().extend_from_slice(rows);
        Ok(())
    }

    async fn delete_all(&self, _table: &TableRef) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let n = rows.len() as u64;
        rows.clear();
        Ok(n)
    }

    async fn list_puids(&self, _table: &TableRef) -> Result<Vec<String>, StoreError> {
        Ok(self.rows.lock().unwrap().iter().map(|r| r.puid.clone()).collect())
    }
}

#[async_trait]
impl AnalyticsStore for FakeStores {
    async fn query_since(
        &self,
        _table: &TableRef,
        since: DateTime<Utc>,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        if self.fail_queries.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable {
                reason: "injected query failure".into(),
            });
        }
        let mut rows: Vec<AuditRecord> = self
            .changelog
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.timestamp > since)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        Ok(rows)
    }

    async fn append_log(&self, _table: &TableRef, entry: &LogEntry) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable {
                reason: "injected sink failure".into(),
            });
        }
        self.logs.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn delete_all(&self, _table: &TableRef) -> Result<u64, StoreError> {
        let mut changelog = self.changelog.lock().unwrap();
        let n = changelog.len() as u64;
        changelog.clear();
        Ok(n)
    }

    async fn list_puids(&self, _table: &TableRef) -> Result<Vec<String>, StoreError> {
        Ok(self
            .changelog
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.puid.clone())
            .collect())
    }
}

fn config(max_ticks: Option<u64>) -> PipelineConfig {
    PipelineConfig {
        service_name: "test-service".into(),
        row_table: TableRef::new("sample-instance.audit-db", "payment_audit_trail").unwrap(),
        changelog_table: TableRef::new("proj.dataset", "payment_audit_trail_changelog").unwrap(),
        log_table: TableRef::new("proj.dataset", "showcase_log").unwrap(),
        insert_every: Duration::from_millis(1),
        poll_every: Duration::from_millis(1),
        lookback: Duration::from_secs(5),
        max_ticks,
    }
}

fn context(stores: &Arc<FakeStores>, max_ticks: Option<u64>) -> Arc<PipelineContext> {
    PipelineContext::new(
        Arc::clone(stores) as Arc<dyn RowStore>,
        Arc::clone(stores) as Arc<dyn AnalyticsStore>,
        config(max_ticks),
    )
}

fn row_at(ts: DateTime<Utc>) -> AuditRecord {
    let mut row = AuditRecord::synthetic("test-service");
    row.timestamp = ts;
    row
}

#[tokio::test]
async fn poll_returns_batch_ascending_and_advances_watermark() {
    // Pre-seeded watermark T0; batch of T0+1, T0+2, T0+2 (collision).
    let t0 = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let stores = Arc::new(FakeStores::default());
    stores.seed_changelog(vec![
        row_at(t0 + chrono::Duration::seconds(2)),
        row_at(t0 + chrono::Duration::seconds(1)),
        row_at(t0 + chrono::Duration::seconds(2)),
    ]);
    let ctx = context(&stores, None);
    let mut watermark = Watermark::starting_at(t0);

    let rows = poll_tick(&ctx, &mut watermark).await;

    assert_eq!(rows.len(), 3);
    assert!(rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(watermark.value(), t0 + chrono::Duration::seconds(2));
}

#[tokio::test]
async fn empty_poll_leaves_watermark_unchanged() {
    let t0 = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let stores = Arc::new(FakeStores::default());
    let ctx = context(&stores, None);
    let mut watermark = Watermark::starting_at(t0);

    let rows = poll_tick(&ctx, &mut watermark).await;

    assert!(rows.is_empty());
    assert_eq!(watermark.value(), t0);
}

#[tokio::test]
async fn failed_poll_is_treated_as_empty_batch() {
    let t0 = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let stores = Arc::new(FakeStores::default());
    stores.seed_changelog(vec![row_at(t0 + chrono::Duration::seconds(1))]);
    stores.fail_queries.store(true, Ordering::Relaxed);
    let ctx = context(&stores, None);
    let mut watermark = Watermark::starting_at(t0);

    let rows = poll_tick(&ctx, &mut watermark).await;

    assert!(rows.is_empty());
    assert_eq!(watermark.value(), t0);
}

#[tokio::test]
async fn producer_tick_mirrors_write_into_sink() {
    let stores = Arc::new(FakeStores::default());
    let ctx = context(&stores, None);

    let record = producer_tick(&ctx).await.expect("insert should succeed");

    assert!(!record.puid.is_empty());
    assert_eq!(stores.rows.lock().unwrap().len(), 1);
    assert_eq!(stores.log_count(), 1);
    assert_eq!(ctx.sink_writes(), 1);
}

#[tokio::test]
async fn sink_failure_never_escapes_the_producer_loop() {
    let stores = Arc::new(FakeStores::default());
    stores.fail_appends.store(true, Ordering::Relaxed);
    let ctx = context(&stores, Some(3));
    let (_tx, rx) = watch::channel(false);

    let produced = producer_loop(Arc::clone(&ctx), rx).await;

    // Inserts keep succeeding even though every sink append fails.
    assert_eq!(produced, 3);
    assert_eq!(ctx.sink_writes(), 0);
    assert_eq!(stores.rows.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn produced_records_have_distinct_puids() {
    let stores = Arc::new(FakeStores::default());
    let ctx = context(&stores, Some(5));
    let (_tx, rx) = watch::channel(false);

    producer_loop(Arc::clone(&ctx), rx).await;

    let rows = stores.rows.lock().unwrap();
    let mut puids: Vec<&str> = rows.iter().map(|r| r.puid.as_str()).collect();
    puids.sort_unstable();
    puids.dedup();
    assert_eq!(puids.len(), rows.len());
}

#[tokio::test]
async fn bounded_pipeline_runs_to_completion_and_reports_totals() {
    let stores = Arc::new(FakeStores::default());
    let ctx = context(&stores, Some(3));
    let (_tx, rx) = watch::channel(false);

    let summary = run_pipeline(Arc::clone(&ctx), rx).await;

    assert_eq!(summary.produced, 3);
    // Every produced record and every observed row is mirrored to the sink.
    assert_eq!(summary.sink_writes, summary.produced + summary.observed);
    assert_eq!(summary.sink_writes, stores.log_count() as u64);
}

#[tokio::test]
async fn shutdown_signal_stops_an_unbounded_pipeline() {
    let stores = Arc::new(FakeStores::default());
    let ctx = context(&stores, None);
    let (tx, rx) = watch::channel(false);

    let handle = tokio::spawn(run_pipeline(Arc::clone(&ctx), rx));
    tokio::time::sleep(Duration::from_millis(20)).await;
    tx.send(true).expect("pipeline should still be listening");

    let summary = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("pipeline should stop after shutdown")
        .expect("pipeline task should not panic");

    assert!(summary.produced >= 1);
}
