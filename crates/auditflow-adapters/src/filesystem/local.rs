//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use auditflow_core::{application::ports::Filesystem, error::AuditflowResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> AuditflowResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> AuditflowResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> AuditflowResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> auditflow_core::error::AuditflowError {
    use auditflow_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = dir.path().join("a/b");
        let file = nested.join("hello.txt");

        fs.create_dir_all(&nested).unwrap();
        fs.write_file(&file, "hello").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "hello");
    }

    #[test]
    fn overwrites_unconditionally() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let file = dir.path().join("x.txt");

        fs.write_file(&file, "first").unwrap();
        fs.write_file(&file, "second").unwrap();

        assert_eq!(fs.read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn read_missing_file_maps_to_filesystem_error() {
        let fs = LocalFilesystem::new();
        assert!(fs.read_to_string(Path::new("/nonexistent/nope.txt")).is_err());
    }
}
