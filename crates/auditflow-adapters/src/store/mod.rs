//! Store adapters implementing the `RowStore` and `AnalyticsStore` ports.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::InMemoryStore;
