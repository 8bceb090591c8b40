//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`AUDITFLOW_` prefix, `__` section separator)
//! 3. Config file (`--config` path, or the default location if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use auditflow_core::domain::TableRef;

use crate::error::{CliError, CliResult};

/// Which store adapter backs the pipeline commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local in-memory store. State is lost on exit.
    #[default]
    Memory,
    /// JSON-lines files under `stores.data_dir`, one file per table.
    Jsonl,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store backend and table identifiers.
    pub stores: StoresConfig,
    /// Producer/poller timing.
    pub pipeline: PipelineSettings,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
    pub backend: StoreBackend,
    /// Data directory for the jsonl backend.
    pub data_dir: PathBuf,
    /// Namespace of the transactional row table (`instance.database`).
    pub row_namespace: String,
    pub row_table: String,
    /// Namespace of the analytical tables (`project.dataset`).
    pub analytics_namespace: String,
    pub changelog_table: String,
    pub log_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Service name stamped into produced records.
    pub service_name: String,
    pub insert_every_ms: u64,
    pub poll_every_ms: u64,
    /// Cold-start watermark lookback.
    pub lookback_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stores: StoresConfig {
                backend: StoreBackend::Memory,
                data_dir: PathBuf::from("auditflow-data"),
                row_namespace: "sample-instance.audit-db".into(),
                row_table: "payment_audit_trail".into(),
                analytics_namespace: "spanner-gke-443910.audit_service_dataset".into(),
                changelog_table: "payment_audit_trail_changelog".into(),
                log_table: "showcase_log".into(),
            },
            pipeline: PipelineSettings {
                service_name: "payment-service".into(),
                insert_every_ms: 5_000,
                poll_every_ms: 5_000,
                lookback_ms: 5_000,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then an optional file, then environment.
    ///
    /// When `config_file` is `Some` the file must exist; the default location
    /// is only merged if present.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&defaults).map_err(|e| {
                CliError::ConfigError {
                    message: format!("failed to encode built-in defaults: {e}"),
                    source: Some(Box::new(e)),
                }
            })?);

        match config_file {
            Some(path) => {
                builder = builder.add_source(config::File::from(path.as_path()));
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    builder = builder.add_source(config::File::from(default_path));
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("AUDITFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let merged = builder.build().map_err(|e| CliError::ConfigError {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

        merged
            .try_deserialize::<Self>()
            .map_err(|e| CliError::ConfigError {
                message: format!("invalid configuration: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.auditflow.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "auditflow", "auditflow")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".auditflow.toml"))
    }

    /// Fully-qualified reference to the transactional row table.
    pub fn row_table(&self) -> CliResult<TableRef> {
        table_ref(&self.stores.row_namespace, &self.stores.row_table)
    }

    /// Fully-qualified reference to the analytical changelog table.
    pub fn changelog_table(&self) -> CliResult<TableRef> {
        table_ref(&self.stores.analytics_namespace, &self.stores.changelog_table)
    }

    /// Fully-qualified reference to the logging sink table.
    pub fn log_table(&self) -> CliResult<TableRef> {
        table_ref(&self.stores.analytics_namespace, &self.stores.log_table)
    }

    pub fn insert_every(&self) -> Duration {
        Duration::from_millis(self.pipeline.insert_every_ms)
    }

    pub fn poll_every(&self) -> Duration {
        Duration::from_millis(self.pipeline.poll_every_ms)
    }

    pub fn lookback(&self) -> Duration {
        Duration::from_millis(self.pipeline.lookback_ms)
    }
}

fn table_ref(namespace: &str, table: &str) -> CliResult<TableRef> {
    TableRef::new(namespace, table).map_err(|e| CliError::InvalidInput {
        message: format!("invalid table identifier '{namespace}.{table}': {e}"),
        source: Some(Box::new(e)),
    })
}

/// Resolve the data directory for a file-backed store, preferring the CLI
/// flag over config.
pub fn resolve_data_dir(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .unwrap_or_else(|| config.stores.data_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_is_memory() {
        assert_eq!(AppConfig::default().stores.backend, StoreBackend::Memory);
    }

    #[test]
    fn default_intervals_are_five_seconds() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.insert_every(), Duration::from_millis(5_000));
        assert_eq!(cfg.poll_every(), Duration::from_millis(5_000));
        assert_eq!(cfg.lookback(), Duration::from_millis(5_000));
    }

    #[test]
    fn default_tables_resolve_to_qualified_names() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.row_table().unwrap().qualified(),
            "sample-instance.audit-db.payment_audit_trail"
        );
        assert_eq!(
            cfg.changelog_table().unwrap().qualified(),
            "spanner-gke-443910.audit_service_dataset.payment_audit_trail_changelog"
        );
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }

    #[test]
    fn data_dir_flag_wins_over_config() {
        let cfg = AppConfig::default();
        let dir = resolve_data_dir(Some(Path::new("/tmp/other")), &cfg);
        assert_eq!(dir, PathBuf::from("/tmp/other"));
    }
}
