//! Write statements for the dependency graph.
//!
//! Packages become nodes labelled with their type; relations become
//! `Requires` edges. A batch is rendered as a single statement so that edges
//! can refer to nodes created earlier in the same batch through their
//! correlation-id variables.

use std::collections::HashSet;

use depvis_core::{CorrelationId, Package, Relation};

use crate::client::GraphError;
use crate::queries::REQUIRES;
use crate::statement::{quote_identifier, Statement};

/// Statement that creates one package node, bound to `pkg_<id>` in its batch.
pub fn build_create_node(id: &CorrelationId, package: &Package) -> Statement {
    let var = node_var(id);
    let label = quote_identifier(package.kind());
    Statement::new(format!(
        "CREATE ({var}:{label} {{vendor: ${var}_vendor, name: ${var}_name, url: ${var}_url, version: ${var}_version}})"
    ))
    .param(format!("{var}_vendor"), package.vendor())
    .param(format!("{var}_name"), package.name())
    .param(format!("{var}_url"), package.url())
    .param(format!("{var}_version"), package.version())
}

/// Statement that creates a `Requires` edge between two nodes of the batch.
///
/// `ordinal` keeps the edge's parameter names unique within the batch, since
/// a package may require the same package more than once (e.g. both as
/// "require" and "require-dev").
pub fn build_create_edge(ordinal: usize, relation: &Relation) -> Statement {
    let from = node_var(relation.package());
    let to = node_var(relation.requires());
    let p = format!("req_{ordinal}");
    Statement::new(format!(
        "CREATE ({from})-[:{REQUIRES} {{version: ${p}_version, `for`: ${p}_for}}]->({to})"
    ))
    .param(format!("{p}_version"), relation.version())
    .param(format!("{p}_for"), relation.scope())
}

fn node_var(id: &CorrelationId) -> String {
    format!("pkg_{id}")
}

/// Pending write statements owned by one caller.
///
/// Lifecycle: staged → flushed → empty. Staging only builds statements;
/// nothing reaches the store until the batch is flushed.
#[derive(Debug, Default)]
pub struct WriteBatch {
    nodes: Vec<Statement>,
    edges: Vec<Statement>,
    staged_ids: HashSet<CorrelationId>,
    references: Vec<CorrelationId>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the creation of `package` under correlation id `id`.
    ///
    /// Ids must be unique within the batch; a repeated id is rejected by the
    /// store when the batch is flushed.
    pub fn stage_node(&mut self, id: CorrelationId, package: &Package) {
        self.nodes.push(build_create_node(&id, package));
        self.staged_ids.insert(id);
    }

    /// Queue a `Requires` edge. Both ends must be staged in this batch
    /// before it is rendered.
    pub fn stage_relation(&mut self, relation: &Relation) {
        self.edges.push(build_create_edge(self.edges.len(), relation));
        self.references.push(relation.package().clone());
        self.references.push(relation.requires().clone());
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Render the batch as one statement: all node creations, then all edge
    /// creations, each group in staging order.
    ///
    /// Returns `Ok(None)` for an empty batch, and fails if any relation
    /// refers to a correlation id that was never staged.
    pub fn to_statement(&self) -> Result<Option<Statement>, GraphError> {
        if let Some(missing) = self
            .references
            .iter()
            .find(|id| !self.staged_ids.contains(*id))
        {
            return Err(GraphError::UnresolvedReference {
                id: missing.to_string(),
            });
        }
        Ok(Statement::join(self.nodes.iter().chain(&self.edges).cloned()))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.staged_ids.clear();
        self.references.clear();
    }
}
