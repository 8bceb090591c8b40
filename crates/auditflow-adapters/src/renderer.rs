//! Variable substitution renderer for skeleton templates.

use std::path::Path;

use auditflow_core::{
    application::ports::SkeletonRenderer,
    domain::{RenderVars, ServiceTree, SkeletonNode, SkeletonTemplate},
    error::{AuditflowError, AuditflowResult},
};
use tracing::instrument;

/// Renders skeletons with `{{VARIABLE}}` substitution in both paths and
/// file contents.
pub struct SubstitutionRenderer;

impl SubstitutionRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubstitutionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkeletonRenderer for SubstitutionRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &SkeletonTemplate,
        vars: &RenderVars,
        output_root: &Path,
    ) -> AuditflowResult<ServiceTree> {
        template.validate().map_err(AuditflowError::Domain)?;

        let mut tree = ServiceTree::new(output_root);
        for node in &template.nodes {
            match node {
                SkeletonNode::File(spec) => {
                    tree.add_file(vars.render(&spec.path), vars.render(&spec.content));
                }
                SkeletonNode::Directory(spec) => {
                    tree.add_directory(vars.render(&spec.path));
                }
            }
        }

        tree.validate().map_err(AuditflowError::Domain)?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_core::domain::ServiceDescriptor;

    fn vars() -> RenderVars {
        let descriptor = ServiceDescriptor::new("payment-service", "Payment").unwrap();
        RenderVars::for_service(&descriptor, "com.example")
    }

    #[test]
    fn renders_paths_and_contents() {
        let template = SkeletonTemplate::new("t", "test")
            .with_directory("src/{{GROUP_PATH}}/{{SERVICE_PACKAGE}}")
            .with_file(
                "src/{{GROUP_PATH}}/{{SERVICE_PACKAGE}}/{{SERVICE_CLASS}}Controller.java",
                "package {{GROUP_ID}}.{{SERVICE_PACKAGE}};",
            );

        let tree = SubstitutionRenderer::new()
            .render(&template, &vars(), Path::new("out"))
            .unwrap();

        let file = tree.files().next().unwrap();
        assert_eq!(
            file.path.to_str().unwrap(),
            "src/com/example/paymentservice/PaymentController.java"
        );
        assert_eq!(file.content, "package com.example.paymentservice;");
    }

    #[test]
    fn rendering_twice_yields_identical_trees() {
        let template = SkeletonTemplate::new("t", "test")
            .with_file("{{SERVICE_NAME}}.txt", "{{SERVICE_CLASS}}");
        let renderer = SubstitutionRenderer::new();

        let a = renderer.render(&template, &vars(), Path::new("out")).unwrap();
        let b = renderer.render(&template, &vars(), Path::new("out")).unwrap();

        let files = |t: &ServiceTree| -> Vec<(String, String)> {
            t.files()
                .map(|f| (f.path.display().to_string(), f.content.clone()))
                .collect()
        };
        assert_eq!(files(&a), files(&b));
    }

    #[test]
    fn colliding_rendered_paths_are_rejected() {
        // Distinct pre-render paths that collapse to the same rendered path.
        let template = SkeletonTemplate::new("t", "test")
            .with_file("{{SERVICE_NAME}}.txt", "a")
            .with_file("payment-service.txt", "b");

        let result = SubstitutionRenderer::new().render(&template, &vars(), Path::new("out"));
        assert!(result.is_err());
    }
}
