//! Implementation of the `auditflow run` command.
//!
//! Starts the full producer + poller pipeline against the selected store
//! backend and runs until Ctrl-C (or until the `--ticks` budget is
//! exhausted), then prints the run summary.

use tracing::{info, instrument, warn};

use auditflow_core::application::{PipelineConfig, PipelineContext, run_pipeline};

use crate::{
    cli::RunArgs,
    commands::{build_stores, runtime},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `auditflow run` command.
#[instrument(skip_all)]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let stores = build_stores(&args.store, &config)?;

    let pipeline_config = PipelineConfig {
        service_name: args
            .service
            .unwrap_or_else(|| config.pipeline.service_name.clone()),
        row_table: config.row_table()?,
        changelog_table: config.changelog_table()?,
        log_table: config.log_table()?,
        insert_every: args
            .insert_every_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or_else(|| config.insert_every()),
        poll_every: args
            .poll_every_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or_else(|| config.poll_every()),
        lookback: args
            .lookback_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or_else(|| config.lookback()),
        max_ticks: args.ticks,
    };

    output.header(&format!(
        "Pipeline: {} -> {} (sink {})",
        pipeline_config.row_table, pipeline_config.changelog_table, pipeline_config.log_table,
    ))?;
    match pipeline_config.max_ticks {
        Some(n) => output.info(&format!("Running {n} tick(s) per loop"))?,
        None => output.info("Running until Ctrl-C")?,
    }

    let ctx = PipelineContext::new(stores.row, stores.analytics, pipeline_config);

    let summary = runtime()?.block_on(async move {
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        // Flip the shutdown flag on the first Ctrl-C; both loops observe it
        // at their next await point.
        let signal = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutdown signal received");
                    let _ = shutdown_tx.send(true);
                }
                Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
            }
        });

        let summary = run_pipeline(ctx, shutdown_rx).await;
        signal.abort();
        summary
    });

    output.print("")?;
    output.success(&format!(
        "Pipeline stopped: {} produced, {} observed, {} sink write(s)",
        summary.produced, summary.observed, summary.sink_writes,
    ))?;

    Ok(())
}
