//! Value objects shared across the domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Fully-qualified reference to a remote table: a namespace (instance and
/// database, or project and dataset, joined with dots) plus a table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    namespace: String,
    table: String,
}

impl TableRef {
    /// Build a reference, validating that neither part is empty and the
    /// table name carries no separator.
    pub fn new(namespace: impl Into<String>, table: impl Into<String>) -> Result<Self, DomainError> {
        let namespace = namespace.into();
        let table = table.into();

        if namespace.trim().is_empty() {
            return Err(DomainError::InvalidTableRef(
                "namespace cannot be empty".into(),
            ));
        }
        if table.trim().is_empty() {
            return Err(DomainError::InvalidTableRef("table cannot be empty".into()));
        }
        if table.contains('.') {
            return Err(DomainError::InvalidTableRef(format!(
                "table name '{table}' must not contain '.'"
            )));
        }

        Ok(Self { namespace, table })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// `namespace.table` — the key adapters index their storage by.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.namespace, self.table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.table)
    }
}

impl FromStr for TableRef {
    type Err = DomainError;

    /// Parse `namespace.table`, splitting on the *last* dot so dotted
    /// namespaces (`project.dataset`) survive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, table) = s.rsplit_once('.').ok_or_else(|| {
            DomainError::InvalidTableRef(format!("'{s}' is not in 'namespace.table' form"))
        })?;
        Self::new(namespace, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_joins_namespace_and_table() {
        let t = TableRef::new("sample-instance.audit-db", "payment_audit_trail").unwrap();
        assert_eq!(t.qualified(), "sample-instance.audit-db.payment_audit_trail");
    }

    #[test]
    fn parse_splits_on_last_dot() {
        let t: TableRef = "proj.dataset.changelog".parse().unwrap();
        assert_eq!(t.namespace(), "proj.dataset");
        assert_eq!(t.table(), "changelog");
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(TableRef::new("", "t").is_err());
        assert!(TableRef::new("ns", "").is_err());
        assert!(TableRef::new("ns", "a.b").is_err());
    }

    #[test]
    fn rejects_undotted_string() {
        assert!("nodots".parse::<TableRef>().is_err());
    }
}
