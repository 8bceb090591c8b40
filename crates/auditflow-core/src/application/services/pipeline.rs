//! Insert-and-poll pipeline.
//!
//! Two cooperative tasks share a [`PipelineContext`]:
//!
//! - the **producer** writes one synthetic record per tick into the row
//!   store and mirrors each successful write into the logging sink,
//! - the **poller** queries the analytical changelog for rows newer than
//!   its watermark, logs each new row to the sink, and advances the
//!   watermark to the batch maximum.
//!
//! Every remote failure is logged and absorbed; the next tick retries.
//! Each loop sleeps a fixed interval between iterations regardless of call
//! latency — slow calls shrink throughput rather than queue work. Shutdown
//! is cooperative: a watch channel flips to `true`, both loops observe it
//! at their next await point, and the caller joins them and reads the sink
//! counter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{AnalyticsStore, RowStore},
    domain::{AuditRecord, LogEntry, TableRef, Watermark},
};

/// Static pipeline parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Stamped into every produced record.
    pub service_name: String,
    /// Destination of producer writes.
    pub row_table: TableRef,
    /// Changelog the poller watches.
    pub changelog_table: TableRef,
    /// Append-only sink for audit lines.
    pub log_table: TableRef,
    /// Fixed sleep between producer iterations.
    pub insert_every: Duration,
    /// Fixed sleep between poller iterations.
    pub poll_every: Duration,
    /// Cold-start watermark offset (`now - lookback`).
    pub lookback: Duration,
    /// Optional iteration budget per loop; `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

/// Shared state for the pipeline tasks: store handles and the counter of
/// successful sink writes. Replaces ad hoc globals with one explicit
/// context object.
pub struct PipelineContext {
    row_store: Arc<dyn RowStore>,
    analytics: Arc<dyn AnalyticsStore>,
    config: PipelineConfig,
    sink_writes: AtomicU64,
}

impl PipelineContext {
    pub fn new(
        row_store: Arc<dyn RowStore>,
        analytics: Arc<dyn AnalyticsStore>,
        config: PipelineConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            row_store,
            analytics,
            config,
            sink_writes: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Total successful sink writes so far. Approximate under concurrency;
    /// only displayed at shutdown.
    pub fn sink_writes(&self) -> u64 {
        self.sink_writes.load(Ordering::Relaxed)
    }

    /// Fire-and-forget append to the logging sink. Failure is logged and
    /// swallowed — logging must never abort the producer or poller loops.
    pub async fn log_event(&self, source: &str, details: String) {
        let entry = LogEntry::now(source, details);
        match self.analytics.append_log(&self.config.log_table, &entry).await {
            Ok(()) => {
                self.sink_writes.fetch_add(1, Ordering::Relaxed);
                debug!(source, "logged to sink");
            }
            Err(e) => warn!(source, error = %e, "sink append failed, continuing"),
        }
    }
}

/// One producer iteration: generate, insert, mirror to the sink.
///
/// Returns the record on successful insert, `None` on failure (which has
/// already been logged).
pub async fn producer_tick(ctx: &PipelineContext) -> Option<AuditRecord> {
    let record = AuditRecord::synthetic(&ctx.config.service_name);

    match ctx
        .row_store
        .insert_batch(&ctx.config.row_table, std::slice::from_ref(&record))
        .await
    {
        Ok(()) => {
            info!(puid = %record.puid, table = %ctx.config.row_table, "inserted record");
            ctx.log_event(
                "row-store",
                format!("inserted record {} ({})", record.puid, record.action),
            )
            .await;
            Some(record)
        }
        Err(e) => {
            warn!(error = %e, table = %ctx.config.row_table, "insert failed, continuing");
            None
        }
    }
}

/// One poller iteration: query past the watermark, log new rows, advance.
///
/// A failed query is logged and treated as an empty batch: the watermark
/// stays put and the next tick retries. An empty batch likewise leaves
/// the watermark unchanged.
pub async fn poll_tick(ctx: &PipelineContext, watermark: &mut Watermark) -> Vec<AuditRecord> {
    let since = watermark.value();
    let rows = match ctx
        .analytics
        .query_since(&ctx.config.changelog_table, since)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, table = %ctx.config.changelog_table, "poll failed, retrying next tick");
            return Vec::new();
        }
    };

    if rows.is_empty() {
        debug!(since = %since, "no new rows");
        return rows;
    }

    for row in &rows {
        info!(puid = %row.puid, timestamp = %row.timestamp, "new row observed");
        ctx.log_event("analytics", format!("new row {}", row.puid)).await;
    }
    watermark.observe_batch(&rows);

    rows
}

/// Producer loop. Returns the number of successfully inserted records.
#[instrument(skip_all, fields(table = %ctx.config.row_table))]
pub async fn producer_loop(ctx: Arc<PipelineContext>, mut shutdown: watch::Receiver<bool>) -> u64 {
    let mut produced = 0u64;
    let mut ticks = 0u64;

    info!(every = ?ctx.config.insert_every, "producer started");
    loop {
        if *shutdown.borrow() {
            break;
        }

        if producer_tick(&ctx).await.is_some() {
            produced += 1;
        }

        ticks += 1;
        if ctx.config.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(ctx.config.insert_every) => {}
            _ = shutdown.changed() => break,
        }
    }

    info!(produced, "producer stopped");
    produced
}

/// Poller loop. Returns the number of rows observed past the watermark.
#[instrument(skip_all, fields(table = %ctx.config.changelog_table))]
pub async fn poller_loop(ctx: Arc<PipelineContext>, mut shutdown: watch::Receiver<bool>) -> u64 {
    let mut watermark = Watermark::with_lookback(ctx.config.lookback);
    let mut observed = 0u64;
    let mut ticks = 0u64;

    info!(every = ?ctx.config.poll_every, since = %watermark.value(), "poller started");
    loop {
        if *shutdown.borrow() {
            break;
        }

        observed += poll_tick(&ctx, &mut watermark).await.len() as u64;

        ticks += 1;
        if ctx.config.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(ctx.config.poll_every) => {}
            _ = shutdown.changed() => break,
        }
    }

    info!(observed, watermark = %watermark.value(), "poller stopped");
    observed
}

/// What the pipeline did before shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub produced: u64,
    pub observed: u64,
    pub sink_writes: u64,
}

/// Run producer and poller concurrently until shutdown (or until both
/// exhaust their tick budget), then report totals.
pub async fn run_pipeline(
    ctx: Arc<PipelineContext>,
    shutdown: watch::Receiver<bool>,
) -> PipelineSummary {
    let producer = tokio::spawn(producer_loop(Arc::clone(&ctx), shutdown.clone()));
    let poller = tokio::spawn(poller_loop(Arc::clone(&ctx), shutdown));

    let produced = match producer.await {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "producer task panicked");
            0
        }
    };
    let observed = match poller.await {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "poller task panicked");
            0
        }
    };

    PipelineSummary {
        produced,
        observed,
        sink_writes: ctx.sink_writes(),
    }
}
