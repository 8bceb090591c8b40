//! Implementation of the `auditflow compare` command.
//!
//! Reconciliation check: lists PUIDs in the row store and in the
//! changelog, then reports any that were inserted but never propagated.

use std::collections::HashSet;

use tracing::instrument;

use crate::{
    cli::CompareArgs,
    commands::{build_stores, runtime, store_error},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `auditflow compare` command.
#[instrument(skip_all)]
pub fn execute(args: CompareArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let stores = build_stores(&args.store, &config)?;
    let row_table = config.row_table()?;
    let changelog_table = config.changelog_table()?;

    output.header(&format!(
        "Comparing {row_table} against {changelog_table}"
    ))?;

    let (row_puids, changelog_puids) = runtime()?.block_on(async {
        let rows = stores
            .row
            .list_puids(&row_table)
            .await
            .map_err(store_error)?;
        let changelog = stores
            .analytics
            .list_puids(&changelog_table)
            .await
            .map_err(store_error)?;
        Ok::<_, crate::error::CliError>((rows, changelog))
    })?;

    let seen: HashSet<&str> = changelog_puids.iter().map(String::as_str).collect();
    let missing: Vec<&String> = row_puids
        .iter()
        .filter(|puid| !seen.contains(puid.as_str()))
        .collect();

    output.info(&format!("{} row(s) in the row store", row_puids.len()))?;
    output.info(&format!("{} row(s) in the changelog", changelog_puids.len()))?;

    if missing.is_empty() {
        output.success("All row-store PUIDs are present in the changelog")?;
    } else {
        output.warning(&format!(
            "{} PUID(s) missing from the changelog:",
            missing.len()
        ))?;
        for puid in missing {
            output.print(&format!("  {puid}"))?;
        }
    }

    Ok(())
}
