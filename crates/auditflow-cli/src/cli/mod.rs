//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

use crate::config::StoreBackend;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "auditflow",
    bin_name = "auditflow",
    version  = env!("CARGO_PKG_VERSION"),
    about    = "Service scaffolding and audit-trail mirroring demos",
    long_about = "Auditflow stamps out microservice skeleton trees and runs \
                  insert-and-poll demos that mirror synthetic audit records \
                  between a row store and an analytical changelog.",
    after_help = "EXAMPLES:\n\
        \x20 auditflow scaffold --output ./microservices\n\
        \x20 auditflow run --backend memory --ticks 5 --insert-every-ms 200\n\
        \x20 auditflow watch --backend jsonl --data-dir ./data\n\
        \x20 auditflow completions bash > /usr/share/bash-completion/completions/auditflow",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate service skeleton trees.
    #[command(
        visible_alias = "gen",
        about = "Generate service skeleton trees",
        after_help = "EXAMPLES:\n\
            \x20 auditflow scaffold\n\
            \x20 auditflow scaffold --template spring-boot-service --output ./microservices\n\
            \x20 auditflow scaffold --service billing-service --service ledger-service"
    )]
    Scaffold(ScaffoldArgs),

    /// Run the full producer + poller + sink pipeline.
    #[command(
        about = "Run the insert-and-poll pipeline",
        after_help = "EXAMPLES:\n\
            \x20 auditflow run\n\
            \x20 auditflow run --backend jsonl --data-dir ./data\n\
            \x20 auditflow run --ticks 10 --insert-every-ms 500 --poll-every-ms 500"
    )]
    Run(RunArgs),

    /// Poll the analytical changelog only.
    #[command(
        about = "Watch the changelog for new rows",
        after_help = "EXAMPLES:\n\
            \x20 auditflow watch --backend jsonl --data-dir ./data\n\
            \x20 auditflow watch --ticks 3 --poll-every-ms 1000"
    )]
    Watch(WatchArgs),

    /// Insert synthetic records only.
    #[command(
        about = "Seed the row store with synthetic records",
        after_help = "EXAMPLES:\n\
            \x20 auditflow seed --count 5\n\
            \x20 auditflow seed --backend jsonl --data-dir ./data --count 100 --every-ms 50"
    )]
    Seed(SeedArgs),

    /// Delete all rows from the demo tables.
    #[command(
        about = "Purge the demo tables",
        after_help = "EXAMPLES:\n\
            \x20 auditflow purge              # prompts for table identifiers\n\
            \x20 auditflow purge --yes        # use configured identifiers"
    )]
    Purge(PurgeArgs),

    /// Reconcile row-store PUIDs against the changelog.
    #[command(
        about = "Report PUIDs missing from the changelog",
        after_help = "EXAMPLES:\n\
            \x20 auditflow compare --backend jsonl --data-dir ./data"
    )]
    Compare(CompareArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 auditflow completions bash > ~/.local/share/bash-completion/completions/auditflow\n\
            \x20 auditflow completions zsh  > ~/.zfunc/_auditflow\n\
            \x20 auditflow completions fish > ~/.config/fish/completions/auditflow.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared store selection ────────────────────────────────────────────────────

/// Store backend selection, shared by every pipeline command.
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Which store adapter to use.
    #[arg(long = "backend", value_enum, help = "Store backend (default from config)")]
    pub backend: Option<StoreBackend>,

    /// Data directory for the jsonl backend.
    #[arg(long = "data-dir", value_name = "DIR", help = "Data directory (jsonl backend)")]
    pub data_dir: Option<PathBuf>,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `auditflow scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Output directory for the generated trees.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = "microservices",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Built-in skeleton template id.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        default_value = "maven-service",
        help = "Skeleton template (maven-service, spring-boot-service)"
    )]
    pub template: String,

    /// Services to generate (kebab-case). Repeatable; defaults to the
    /// stock payment/transaction/reconciliation trio.
    #[arg(
        short = 's',
        long = "service",
        value_name = "NAME",
        help = "Service to generate (repeatable)"
    )]
    pub services: Vec<String>,

    /// Java group id used for package paths.
    #[arg(
        short = 'g',
        long = "group-id",
        value_name = "GROUP",
        default_value = "com.example",
        help = "Group id for package paths"
    )]
    pub group_id: String,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `auditflow run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Stop each loop after this many iterations instead of running until
    /// Ctrl-C.
    #[arg(long = "ticks", value_name = "N", help = "Iteration budget per loop")]
    pub ticks: Option<u64>,

    /// Producer sleep between iterations, in milliseconds.
    #[arg(long = "insert-every-ms", value_name = "MS", help = "Producer interval override")]
    pub insert_every_ms: Option<u64>,

    /// Poller sleep between iterations, in milliseconds.
    #[arg(long = "poll-every-ms", value_name = "MS", help = "Poller interval override")]
    pub poll_every_ms: Option<u64>,

    /// Cold-start watermark lookback, in milliseconds.
    #[arg(long = "lookback-ms", value_name = "MS", help = "Watermark lookback override")]
    pub lookback_ms: Option<u64>,

    /// Service name stamped into produced records.
    #[arg(long = "service", value_name = "NAME", help = "Service name override")]
    pub service: Option<String>,
}

// ── watch ─────────────────────────────────────────────────────────────────────

/// Arguments for `auditflow watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Stop after this many polls instead of running until Ctrl-C.
    #[arg(long = "ticks", value_name = "N", help = "Poll budget")]
    pub ticks: Option<u64>,

    /// Poller sleep between iterations, in milliseconds.
    #[arg(long = "poll-every-ms", value_name = "MS", help = "Poller interval override")]
    pub poll_every_ms: Option<u64>,

    /// Cold-start watermark lookback, in milliseconds.
    #[arg(long = "lookback-ms", value_name = "MS", help = "Watermark lookback override")]
    pub lookback_ms: Option<u64>,
}

// ── seed ──────────────────────────────────────────────────────────────────────

/// Arguments for `auditflow seed`.
#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Number of records to insert.
    #[arg(
        short = 'n',
        long = "count",
        value_name = "N",
        default_value_t = 1,
        help = "Number of records to insert"
    )]
    pub count: u64,

    /// Sleep between inserts, in milliseconds.
    #[arg(long = "every-ms", value_name = "MS", help = "Insert interval override")]
    pub every_ms: Option<u64>,

    /// Service name stamped into produced records.
    #[arg(long = "service", value_name = "NAME", help = "Service name override")]
    pub service: Option<String>,
}

// ── purge ─────────────────────────────────────────────────────────────────────

/// Arguments for `auditflow purge`.
#[derive(Debug, Args)]
pub struct PurgeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Skip the interactive prompts and use configured identifiers.
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use configured identifiers")]
    pub yes: bool,
}

// ── compare ───────────────────────────────────────────────────────────────────

/// Arguments for `auditflow compare`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `auditflow completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Shells we can generate completions for.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
