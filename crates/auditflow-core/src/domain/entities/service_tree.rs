//! Rendered service tree ready for materialization.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::error::DomainError;

/// The output of skeleton rendering: a root directory and the relative
/// entries to create under it. No business logic, only data.
#[derive(Debug, Clone)]
pub struct ServiceTree {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<TreeEntry>,
}

impl ServiceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.entries.push(TreeEntry::File(FileToWrite {
            path: path.into(),
            content,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(TreeEntry::Directory(DirectoryToCreate {
            path: path.into(),
        }));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    /// Non-empty, relative-only, duplicate-free.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidSkeleton(
                "rendered service tree is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            let path_str = path.display().to_string();

            if !seen.insert(path_str.clone()) {
                return Err(DomainError::DuplicatePath { path: path_str });
            }
            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed { path: path_str });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            TreeEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            TreeEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum TreeEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl TreeEntry {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_counts_files_and_directories() {
        let tree = ServiceTree::new("/tmp/out")
            .with_directory("src")
            .with_file("src/Main.java", "class Main {}".into());

        assert_eq!(tree.entry_count(), 2);
        assert_eq!(tree.files().count(), 1);
        assert_eq!(tree.directories().count(), 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn tree_rejects_duplicates() {
        let tree = ServiceTree::new("/tmp/out")
            .with_file("pom.xml", "".into())
            .with_file("pom.xml", "".into());
        assert!(tree.validate().is_err());
    }

    #[test]
    fn tree_rejects_empty_and_absolute() {
        assert!(ServiceTree::new("/tmp/out").validate().is_err());

        let abs = ServiceTree::new("/tmp/out").with_file("/etc/passwd", "".into());
        assert!(abs.validate().is_err());
    }
}
