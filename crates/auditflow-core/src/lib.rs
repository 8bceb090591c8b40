//! Auditflow Core
//!
//! Domain and application layers for the auditflow toolkit, following a
//! hexagonal (ports and adapters) layout.
//!
//! Two use cases live here:
//!
//! - **Scaffolding**: render built-in service skeleton templates into
//!   directory trees ([`application::ScaffoldService`]).
//! - **Insert-and-poll pipeline**: a producer task writing synthetic audit
//!   records into a row store, a poller task following an analytical
//!   changelog with a watermark cursor, and a fire-and-forget logging sink
//!   ([`application::services::pipeline`]).
//!
//! External systems (stores, filesystem, rendering) are reached only
//! through the traits in [`application::ports`]; the `auditflow-adapters`
//! crate provides the implementations.

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateReport, PipelineConfig, PipelineContext, PipelineSummary, ScaffoldService,
        ports::{AnalyticsStore, Filesystem, RowStore, SkeletonRenderer},
        run_pipeline,
    };
    pub use crate::domain::{
        AuditRecord, LogEntry, RenderVars, ServiceDescriptor, ServiceTree, SkeletonTemplate,
        TableRef, Watermark,
    };
    pub use crate::error::{AuditflowError, AuditflowResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
