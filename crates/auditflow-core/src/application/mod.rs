//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (scaffolding, the pipeline loops)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, StoreError};
pub use ports::{AnalyticsStore, Filesystem, RowStore, SkeletonRenderer};
pub use services::{
    GenerateReport, PipelineConfig, PipelineContext, PipelineSummary, ScaffoldService,
    poll_tick, poller_loop, producer_loop, producer_tick, run_pipeline,
};
