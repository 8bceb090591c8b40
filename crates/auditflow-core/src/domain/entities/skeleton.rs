//! Service skeleton templates and descriptors.
//!
//! A [`SkeletonTemplate`] is a fixed set of path/content specs with
//! `{{VARIABLE}}` placeholders. Rendering one against a
//! [`ServiceDescriptor`] is a pure, deterministic string substitution:
//! the same descriptor list always yields byte-identical output.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A service to stamp out: a kebab-case directory name plus the label used
/// for class names (`payment-service` / `Payment`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    name: String,
    label: String,
}

impl ServiceDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let label = label.into();

        if name.is_empty() || label.is_empty() {
            return Err(DomainError::InvalidDescriptor(
                "service name and label cannot be empty".into(),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::InvalidDescriptor(format!(
                "service name '{name}' must be kebab-case (lowercase, digits, hyphens)"
            )));
        }

        Ok(Self { name, label })
    }

    /// Derive the label from the name: `payment-service` → `Payment`.
    pub fn from_name(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let label = name
            .split('-')
            .next()
            .map(capitalize)
            .unwrap_or_default();
        Self::new(name, label)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Variable table for skeleton rendering.
///
/// Standard variables derived from a descriptor:
///
/// | Variable          | Example (`payment-service` / `Payment`) |
/// |-------------------|------------------------------------------|
/// | `SERVICE_NAME`    | `payment-service`                        |
/// | `SERVICE_SNAKE`   | `payment_service`                        |
/// | `SERVICE_PACKAGE` | `paymentservice`                         |
/// | `SERVICE_CLASS`   | `Payment`                                |
/// | `GROUP_ID`        | `com.example`                            |
/// | `GROUP_PATH`      | `com/example`                            |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderVars {
    vars: HashMap<String, String>,
}

impl RenderVars {
    pub fn for_service(descriptor: &ServiceDescriptor, group_id: &str) -> Self {
        let name = descriptor.name();
        let mut vars = HashMap::new();
        vars.insert("SERVICE_NAME".into(), name.to_string());
        vars.insert("SERVICE_SNAKE".into(), name.replace('-', "_"));
        vars.insert("SERVICE_PACKAGE".into(), name.replace('-', ""));
        vars.insert("SERVICE_CLASS".into(), descriptor.label().to_string());
        vars.insert("GROUP_ID".into(), group_id.to_string());
        vars.insert("GROUP_PATH".into(), group_id.replace('.', "/"));
        Self { vars }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Substitute every `{{KEY}}` occurrence. Unknown placeholders are
    /// left verbatim.
    pub fn render(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (key, value) in &self.vars {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        out
    }
}

/// One node of a skeleton: a file with templated path and content, or a
/// bare directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkeletonNode {
    File(FileSpec),
    Directory(DirSpec),
}

impl SkeletonNode {
    pub fn path(&self) -> &str {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    pub path: String,
    pub content: String,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirSpec {
    pub path: String,
}

impl DirSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A complete skeleton: identifier, description, and the node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonTemplate {
    pub id: String,
    pub description: String,
    pub nodes: Vec<SkeletonNode>,
}

impl SkeletonTemplate {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            nodes: Vec::new(),
        }
    }

    pub fn with_node(mut self, node: SkeletonNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.with_node(SkeletonNode::File(FileSpec::new(path, content)))
    }

    pub fn with_directory(self, path: impl Into<String>) -> Self {
        self.with_node(SkeletonNode::Directory(DirSpec::new(path)))
    }

    /// A skeleton must be non-empty and free of duplicate (pre-render)
    /// paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.nodes.is_empty() {
            return Err(DomainError::EmptySkeleton {
                id: self.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.path()) {
                return Err(DomainError::DuplicatePath {
                    path: node.path().to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> ServiceDescriptor {
        ServiceDescriptor::new("payment-service", "Payment").unwrap()
    }

    #[test]
    fn descriptor_rejects_non_kebab_names() {
        assert!(ServiceDescriptor::new("Payment Service", "Payment").is_err());
        assert!(ServiceDescriptor::new("", "Payment").is_err());
        assert!(ServiceDescriptor::new("payment-service", "").is_err());
    }

    #[test]
    fn descriptor_from_name_derives_label() {
        let d = ServiceDescriptor::from_name("reconciliation-service").unwrap();
        assert_eq!(d.label(), "Reconciliation");
    }

    #[test]
    fn render_vars_standard_casings() {
        let vars = RenderVars::for_service(&payment(), "com.example");

        assert_eq!(vars.get("SERVICE_NAME"), Some("payment-service"));
        assert_eq!(vars.get("SERVICE_SNAKE"), Some("payment_service"));
        assert_eq!(vars.get("SERVICE_PACKAGE"), Some("paymentservice"));
        assert_eq!(vars.get("SERVICE_CLASS"), Some("Payment"));
        assert_eq!(vars.get("GROUP_PATH"), Some("com/example"));
    }

    #[test]
    fn render_substitutes_placeholders() {
        let vars = RenderVars::for_service(&payment(), "com.example");
        let out = vars.render("package {{GROUP_ID}}.{{SERVICE_PACKAGE}};");
        assert_eq!(out, "package com.example.paymentservice;");
    }

    #[test]
    fn render_leaves_unknown_placeholders_verbatim() {
        let vars = RenderVars::for_service(&payment(), "com.example");
        assert_eq!(vars.render("{{NOT_A_VAR}}"), "{{NOT_A_VAR}}");
    }

    #[test]
    fn render_is_deterministic() {
        let template = "{{SERVICE_CLASS}}Controller in {{GROUP_ID}}.{{SERVICE_PACKAGE}}";
        let a = RenderVars::for_service(&payment(), "com.example").render(template);
        let b = RenderVars::for_service(&payment(), "com.example").render(template);
        assert_eq!(a, b);
    }

    #[test]
    fn skeleton_rejects_empty_and_duplicates() {
        let empty = SkeletonTemplate::new("maven-service", "Maven layout");
        assert!(empty.validate().is_err());

        let dup = SkeletonTemplate::new("maven-service", "Maven layout")
            .with_directory("src")
            .with_directory("src");
        assert!(dup.validate().is_err());
    }
}
