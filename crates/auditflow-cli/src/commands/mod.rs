//! Command handlers.
//!
//! Each submodule owns one subcommand. Handlers translate CLI arguments
//! into core types, wire up adapters, and display results — no business
//! logic lives here.

use std::sync::Arc;

use auditflow_core::application::ports::{AnalyticsStore, RowStore};
use auditflow_core::error::AuditflowError;
use auditflow_adapters::{InMemoryStore, JsonlStore};

use crate::{
    cli::StoreArgs,
    config::{AppConfig, StoreBackend, resolve_data_dir},
    error::{CliError, CliResult},
};

pub mod compare;
pub mod completions;
pub mod purge;
pub mod run;
pub mod scaffold;
pub mod seed;
pub mod watch;

/// Build the tokio runtime for the pipeline commands.
///
/// `main` stays synchronous (scaffold and completions never need a
/// runtime); the commands that do need one build it here.
pub(crate) fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::from)
}

/// Trait-object handles for the two store ports, backed by one adapter.
pub(crate) struct Stores {
    pub row: Arc<dyn RowStore>,
    pub analytics: Arc<dyn AnalyticsStore>,
}

/// Resolve the backend (flag wins over config) and construct the adapter,
/// with the row table mirrored into the changelog so the poller sees
/// producer writes.
pub(crate) fn build_stores(args: &StoreArgs, config: &AppConfig) -> CliResult<Stores> {
    let backend = args.backend.unwrap_or(config.stores.backend);
    let row_table = config.row_table()?;
    let changelog_table = config.changelog_table()?;

    match backend {
        StoreBackend::Memory => {
            let store = InMemoryStore::new().with_mirror(&row_table, &changelog_table);
            Ok(Stores {
                row: Arc::new(store.clone()),
                analytics: Arc::new(store),
            })
        }
        StoreBackend::Jsonl => {
            let dir = resolve_data_dir(args.data_dir.as_deref(), config);
            let store = JsonlStore::open(dir)
                .map_err(|e| CliError::Core(AuditflowError::from(
                    auditflow_core::application::error::ApplicationError::from(e),
                )))?
                .with_mirror(&row_table, &changelog_table);
            Ok(Stores {
                row: Arc::new(store.clone()),
                analytics: Arc::new(store),
            })
        }
    }
}

/// Shorthand for lifting a raw store failure into a `CliError`.
pub(crate) fn store_error(e: auditflow_core::application::error::StoreError) -> CliError {
    CliError::Core(AuditflowError::from(
        auditflow_core::application::error::ApplicationError::from(e),
    ))
}
