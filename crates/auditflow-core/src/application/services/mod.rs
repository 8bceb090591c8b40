//! Application services.

pub mod pipeline;
pub mod scaffold_service;

pub use pipeline::{
    PipelineConfig, PipelineContext, PipelineSummary, poll_tick, poller_loop, producer_loop,
    producer_tick, run_pipeline,
};
pub use scaffold_service::{GenerateReport, ScaffoldService};
