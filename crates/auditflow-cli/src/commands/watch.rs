//! Implementation of the `auditflow watch` command.
//!
//! Poll-only mode: watches the analytical changelog past a watermark and
//! prints each new row. Useful when another process (or `auditflow seed`)
//! is producing.

use tracing::{info, instrument, warn};

use auditflow_core::{
    application::{PipelineConfig, PipelineContext, poll_tick},
    domain::Watermark,
};

use crate::{
    cli::WatchArgs,
    commands::{build_stores, runtime},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `auditflow watch` command.
#[instrument(skip_all)]
pub fn execute(args: WatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let stores = build_stores(&args.store, &config)?;

    let pipeline_config = PipelineConfig {
        service_name: config.pipeline.service_name.clone(),
        row_table: config.row_table()?,
        changelog_table: config.changelog_table()?,
        log_table: config.log_table()?,
        insert_every: config.insert_every(),
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

    output.header(&format!("Watching {}", pipeline_config.changelog_table))?;

    let ctx = PipelineContext::new(stores.row, stores.analytics, pipeline_config);

    let out = &output;
    let observed = runtime()?.block_on(async move {
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let signal = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutdown signal received");
                    let _ = shutdown_tx.send(true);
                }
                Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
            }
        });

        let mut watermark = Watermark::with_lookback(ctx.config().lookback);
        let mut observed = 0u64;
        let mut ticks = 0u64;

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            let rows = poll_tick(&ctx, &mut watermark).await;
            for row in &rows {
                let _ = out.record(row);
            }
            observed += rows.len() as u64;

            ticks += 1;
            if ctx.config().max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(ctx.config().poll_every) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        signal.abort();
        observed
    });

    output.print("")?;
    output.success(&format!("Watch stopped: {observed} row(s) observed"))?;

    Ok(())
}
