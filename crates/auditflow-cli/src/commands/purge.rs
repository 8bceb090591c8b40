//! Implementation of the `auditflow purge` command.
//!
//! Deletes every row from the demo tables. By default the table
//! identifiers are prompted for interactively (with the configured values
//! as defaults); `--yes` skips the prompts and uses config as-is.

use tracing::{info, instrument};

use auditflow_core::domain::TableRef;

use crate::{
    cli::PurgeArgs,
    commands::{Stores, build_stores, runtime, store_error},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// The three tables a purge touches.
struct PurgeTargets {
    row_table: TableRef,
    changelog_table: TableRef,
    log_table: TableRef,
}

/// Execute the `auditflow purge` command.
#[instrument(skip_all)]
pub fn execute(args: PurgeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let targets = if args.yes {
        PurgeTargets {
            row_table: config.row_table()?,
            changelog_table: config.changelog_table()?,
            log_table: config.log_table()?,
        }
    } else {
        prompt_targets(&config)?
    };

    let stores = build_stores(&args.store, &config)?;

    output.header("Purging demo tables...")?;
    info!(
        row = %targets.row_table,
        changelog = %targets.changelog_table,
        log = %targets.log_table,
        "purge started"
    );

    let (rows, changelog, logs) = runtime()?.block_on(purge_all(&stores, &targets))?;

    output.success(&format!("{rows} row(s) removed from {}", targets.row_table))?;
    output.success(&format!(
        "{changelog} row(s) removed from {}",
        targets.changelog_table
    ))?;
    output.success(&format!("{logs} entry(s) removed from {}", targets.log_table))?;

    Ok(())
}

async fn purge_all(stores: &Stores, targets: &PurgeTargets) -> CliResult<(u64, u64, u64)> {
    let rows = stores
        .row
        .delete_all(&targets.row_table)
        .await
        .map_err(store_error)?;
    let changelog = stores
        .analytics
        .delete_all(&targets.changelog_table)
        .await
        .map_err(store_error)?;
    let logs = stores
        .analytics
        .delete_all(&targets.log_table)
        .await
        .map_err(store_error)?;
    Ok((rows, changelog, logs))
}

/// Prompt for the six identifiers that name the three tables, defaulting
/// to the configured values.
#[cfg(feature = "interactive")]
fn prompt_targets(config: &AppConfig) -> CliResult<PurgeTargets> {
    use dialoguer::Input;

    let (instance, database) = split_namespace(&config.stores.row_namespace);
    let (project, dataset) = split_namespace(&config.stores.analytics_namespace);

    let instance: String = prompt("Instance id", instance)?;
    let database: String = prompt("Database id", database)?;
    let row_table: String = prompt("Row table", config.stores.row_table.clone())?;
    let project: String = prompt("Project id", project)?;
    let dataset: String = prompt("Dataset id", dataset)?;
    let changelog_table: String =
        prompt("Changelog table", config.stores.changelog_table.clone())?;

    let row_namespace = format!("{instance}.{database}");
    let analytics_namespace = format!("{project}.{dataset}");

    return Ok(PurgeTargets {
        row_table: table(&row_namespace, &row_table)?,
        changelog_table: table(&analytics_namespace, &changelog_table)?,
        log_table: table(&analytics_namespace, &config.stores.log_table)?,
    });

    fn prompt(label: &str, default: String) -> CliResult<String> {
        Input::new()
            .with_prompt(label)
            .default(default)
            .interact_text()
            .map_err(|e| match e {
                dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                    CliError::Cancelled
                }
                dialoguer::Error::IO(io) => CliError::from(io),
            })
    }

    fn table(namespace: &str, name: &str) -> CliResult<TableRef> {
        TableRef::new(namespace, name).map_err(|e| CliError::InvalidInput {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(not(feature = "interactive"))]
fn prompt_targets(_config: &AppConfig) -> CliResult<PurgeTargets> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Split `instance.database` at the first dot; a dotless namespace keeps
/// the whole string on the left and an empty right half.
#[cfg(feature = "interactive")]
fn split_namespace(namespace: &str) -> (String, String) {
    match namespace.split_once('.') {
        Some((left, right)) => (left.to_string(), right.to_string()),
        None => (namespace.to_string(), String::new()),
    }
}

#[cfg(all(test, feature = "interactive"))]
mod tests {
    use super::*;

    #[test]
    fn namespace_splits_at_first_dot() {
        let (left, right) = split_namespace("sample-instance.audit-db");
        assert_eq!(left, "sample-instance");
        assert_eq!(right, "audit-db");
    }

    #[test]
    fn dotless_namespace_keeps_left_side() {
        let (left, right) = split_namespace("solo");
        assert_eq!(left, "solo");
        assert_eq!(right, "");
    }
}
