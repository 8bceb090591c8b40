//! Domain entities.

pub mod record;
pub mod service_tree;
pub mod skeleton;

pub use record::{AuditRecord, LogEntry, parse_details};
pub use service_tree::{DirectoryToCreate, FileToWrite, ServiceTree, TreeEntry};
pub use skeleton::{
    DirSpec, FileSpec, RenderVars, ServiceDescriptor, SkeletonNode, SkeletonTemplate,
};
