//! Scaffold service - stamps out service skeleton trees.
//!
//! Workflow per descriptor:
//! 1. Build the render variable table
//! 2. Render the skeleton into a service tree
//! 3. Write the tree to the filesystem (directories first, then files)
//!
//! Generation is total and deterministic: the same descriptor list always
//! produces byte-identical files, and existing files are overwritten
//! unconditionally. There is no rollback, dry-run planning is the caller's
//! concern via [`ScaffoldService::plan`].

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::ports::{Filesystem, SkeletonRenderer},
    domain::{RenderVars, ServiceDescriptor, ServiceTree, SkeletonTemplate},
    error::{AuditflowError, AuditflowResult},
};

/// Outcome of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub services: usize,
    pub directories_created: usize,
    pub files_written: usize,
}

/// Main scaffolding orchestrator.
pub struct ScaffoldService {
    renderer: Box<dyn SkeletonRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(renderer: Box<dyn SkeletonRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render and write one skeleton per descriptor under `output_root`.
    #[instrument(skip_all, fields(template = %template.id, output = %output_root.display()))]
    pub fn generate(
        &self,
        template: &SkeletonTemplate,
        services: &[ServiceDescriptor],
        group_id: &str,
        output_root: &Path,
    ) -> AuditflowResult<GenerateReport> {
        let trees = self.plan(template, services, group_id, output_root)?;

        let mut report = GenerateReport {
            services: services.len(),
            ..Default::default()
        };

        for tree in &trees {
            let (dirs, files) = self.write_tree(tree)?;
            report.directories_created += dirs;
            report.files_written += files;
        }

        info!(
            services = report.services,
            files = report.files_written,
            "scaffold completed"
        );
        Ok(report)
    }

    /// Render every descriptor without touching the filesystem.
    pub fn plan(
        &self,
        template: &SkeletonTemplate,
        services: &[ServiceDescriptor],
        group_id: &str,
        output_root: &Path,
    ) -> AuditflowResult<Vec<ServiceTree>> {
        template.validate().map_err(AuditflowError::Domain)?;

        let mut trees = Vec::with_capacity(services.len());
        for service in services {
            let vars = RenderVars::for_service(service, group_id);
            let service_root = output_root.join(service.name());
            let tree = self.renderer.render(template, &vars, &service_root)?;
            tree.validate().map_err(AuditflowError::Domain)?;
            trees.push(tree);
        }
        Ok(trees)
    }

    /// Materialize a rendered tree. Returns (directories, files) written.
    fn write_tree(&self, tree: &ServiceTree) -> AuditflowResult<(usize, usize)> {
        let root = tree.root();
        self.filesystem.create_dir_all(root)?;

        let mut dirs = 0;
        for dir in tree.directories() {
            self.filesystem.create_dir_all(&root.join(&dir.path))?;
            dirs += 1;
        }

        let mut files = 0;
        for file in tree.files() {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            files += 1;
        }

        Ok((dirs, files))
    }
}
