//! Implementation of the `auditflow seed` command.
//!
//! Producer-only mode: inserts `--count` synthetic records into the row
//! store, one per tick. With the jsonl backend this leaves data behind for
//! a later `auditflow watch` or `auditflow compare`.

use tracing::instrument;

use auditflow_core::application::{PipelineConfig, PipelineContext, producer_loop};

use crate::{
    cli::SeedArgs,
    commands::{build_stores, runtime},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `auditflow seed` command.
#[instrument(skip_all, fields(count = args.count))]
pub fn execute(args: SeedArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let stores = build_stores(&args.store, &config)?;

    let pipeline_config = PipelineConfig {
        service_name: args
            .service
            .unwrap_or_else(|| config.pipeline.service_name.clone()),
        row_table: config.row_table()?,
        changelog_table: config.changelog_table()?,
        log_table: config.log_table()?,
        insert_every: args
            .every_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or_else(|| config.insert_every()),
        poll_every: config.poll_every(),
        lookback: config.lookback(),
        max_ticks: Some(args.count),
    };

    output.header(&format!(
        "Seeding {} record(s) into {}",
        args.count, pipeline_config.row_table,
    ))?;

    let ctx = PipelineContext::new(stores.row, stores.analytics, pipeline_config);

    let produced = runtime()?.block_on(async move {
        // Budget-bounded run; the shutdown channel never fires.
        let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        producer_loop(ctx, shutdown_rx).await
    });

    output.success(&format!("Inserted {produced} record(s)"))?;
    Ok(())
}
