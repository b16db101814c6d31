//! Dependency-tree documents and their import into a [`DependencyStore`].

use serde::Deserialize;

use depvis_core::{CorrelationId, Package, Relation};
use depvis_graph::DependencyStore;

use crate::error::Result;

/// A dependency tree as produced by a manifest resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeDocument {
    pub packages: Vec<PackageEntry>,
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageEntry {
    pub id: CorrelationId,
    pub vendor: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationEntry {
    pub package: CorrelationId,
    pub requires: CorrelationId,
    pub version: String,
    #[serde(rename = "for")]
    pub scope: String,
}

/// Counts of what an import staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub packages: usize,
    pub relations: usize,
}

impl TreeDocument {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Validate every entry, then stage the whole tree into `store`.
    ///
    /// Nothing is staged if any entry is invalid. The caller commits.
    pub fn stage_into<S: DependencyStore + ?Sized>(&self, store: &mut S) -> Result<ImportSummary> {
        let packages = self
            .packages
            .iter()
            .map(|p| -> Result<(CorrelationId, Package)> {
                let pkg = Package::new(&p.vendor, &p.name, &p.kind, &p.version, &p.url)?;
                Ok((p.id.clone(), pkg))
            })
            .collect::<Result<Vec<_>>>()?;
        let relations = self
            .relations
            .iter()
            .map(|r| -> Result<Relation> {
                Ok(Relation::new(
                    r.package.clone(),
                    r.requires.clone(),
                    &r.version,
                    &r.scope,
                )?)
            })
            .collect::<Result<Vec<_>>>()?;

        for (id, pkg) in packages.iter() {
            store.stage_node(id.clone(), pkg);
        }
        for relation in &relations {
            store.stage_relation(relation);
        }

        Ok(ImportSummary {
            packages: packages.len(),
            relations: relations.len(),
        })
    }
}
