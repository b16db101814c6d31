//! Core domain types for the dependency graph.
//!
//! Write-side inputs (`Package`, `Relation`) describe a dependency tree to be
//! persisted. Read-side results (`Node`, `Relationship`, `Record`) are
//! reconstructed from query output and are never built by callers directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ── Correlation Ids ───────────────────────────────────────────────

/// Caller-assigned token linking a staged package to the relations that
/// reference it within one write batch.
///
/// Only ASCII letters, digits and `_` are accepted, since the id is used to
/// name the package's variable inside the generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(raw))
        } else {
            Err(ValidationError::InvalidCorrelationId(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<usize> for CorrelationId {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

impl From<u32> for CorrelationId {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl TryFrom<String> for CorrelationId {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Write-Side Inputs ─────────────────────────────────────────────

/// One package of a dependency tree, as supplied by the caller.
///
/// The `kind` (e.g. "Project", "Library") becomes the node label in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    vendor: String,
    name: String,
    kind: String,
    version: String,
    url: String,
}

impl Package {
    /// Build a package. `vendor`, `name`, `kind` and `version` must be
    /// non-empty; `url` may be empty.
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        version: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let package = Self {
            vendor: vendor.into(),
            name: name.into(),
            kind: kind.into(),
            version: version.into(),
            url: url.into(),
        };
        require("Package", "vendor", &package.vendor)?;
        require("Package", "name", &package.name)?;
        require("Package", "type", &package.kind)?;
        require("Package", "version", &package.version)?;
        Ok(package)
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A "requires" edge between two staged packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    package: CorrelationId,
    requires: CorrelationId,
    version: String,
    scope: String,
}

impl Relation {
    /// Build a relation from `package` to `requires`.
    ///
    /// `version` is the constraint (e.g. "^2.0") and `scope` the dependency
    /// kind (e.g. "require", "require-dev"); both must be non-empty.
    pub fn new(
        package: CorrelationId,
        requires: CorrelationId,
        version: impl Into<String>,
        scope: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let relation = Self {
            package,
            requires,
            version: version.into(),
            scope: scope.into(),
        };
        require("Relation", "version", &relation.version)?;
        require("Relation", "for", &relation.scope)?;
        Ok(relation)
    }

    pub fn package(&self) -> &CorrelationId {
        &self.package
    }

    pub fn requires(&self) -> &CorrelationId {
        &self.requires
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

fn require(entity: &'static str, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::EmptyField { entity, field })
    } else {
        Ok(())
    }
}

// ── Read-Side Results ─────────────────────────────────────────────

/// A package vertex as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Store-internal id.
    pub id: i64,
    /// Fan-in: number of incoming edges.
    pub size: i64,
    pub vendor: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub url: String,
}

/// A "requires" edge as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: i64,
    /// Number of other edges converging on this edge's target (excluding
    /// this one), used as edge weight.
    pub size: i64,
    pub version: String,
    #[serde(rename = "for")]
    pub scope: String,
}

/// One (source, relationship, target) edge of a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub source: Node,
    pub relationship: Relationship,
    pub target: Node,
}

impl Record {
    pub fn new(source: Node, relationship: Relationship, target: Node) -> Self {
        Self {
            source,
            relationship,
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_requires_core_fields() {
        let err = Package::new("", "core", "Project", "1.0", "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "Package",
                field: "vendor"
            }
        );

        let err = Package::new("acme", "core", "Project", "", "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "Package",
                field: "version"
            }
        );
    }

    #[test]
    fn package_allows_empty_url() {
        let pkg = Package::new("acme", "core", "Project", "1.0", "").unwrap();
        assert_eq!(pkg.url(), "");
        assert_eq!(pkg.kind(), "Project");
    }

    #[test]
    fn correlation_id_rejects_statement_syntax() {
        assert!(CorrelationId::new("12").is_ok());
        assert!(CorrelationId::new("root_pkg").is_ok());
        assert!(CorrelationId::new("").is_err());
        assert!(CorrelationId::new("1) DETACH DELETE (x").is_err());
        assert!(CorrelationId::new("a-b").is_err());
    }

    #[test]
    fn correlation_id_from_sequence_number() {
        assert_eq!(CorrelationId::from(7usize).as_str(), "7");
        assert_eq!(CorrelationId::from(3u32).to_string(), "3");
    }

    #[test]
    fn correlation_id_deserializes_with_validation() {
        let id: CorrelationId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(serde_json::from_str::<CorrelationId>("\"4 2\"").is_err());
    }

    #[test]
    fn relation_requires_scope() {
        let err = Relation::new(0usize.into(), 1usize.into(), "^2.0", "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                entity: "Relation",
                field: "for"
            }
        );
    }

    #[test]
    fn record_serializes_with_store_field_names() {
        let node = |id, name: &str| Node {
            id,
            size: 0,
            vendor: "acme".to_string(),
            name: name.to_string(),
            kind: "Library".to_string(),
            version: "1.0".to_string(),
            url: String::new(),
        };
        let record = Record::new(
            node(1, "core"),
            Relationship {
                id: 9,
                size: 1,
                version: "^1.0".to_string(),
                scope: "require".to_string(),
            },
            node(2, "util"),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"]["type"], "Library");
        assert_eq!(json["relationship"]["for"], "require");
    }
}
