//! The dependency graph service: stage a tree, commit it, query it back.

use async_trait::async_trait;

use depvis_core::{CorrelationId, Package, Record, Relation};

use crate::client::{GraphClient, GraphError};
use crate::gateway::StoreGateway;
use crate::mapper::map_records;
use crate::mutations::WriteBatch;
use crate::queries::{build_bounded_path_query, build_full_graph_query, PathTarget, QueryOptions};

/// Storage contract for dependency graphs.
///
/// Writes are staged and sent in one [`commit`](DependencyStore::commit).
/// Reads never see or disturb staged writes.
#[async_trait]
pub trait DependencyStore: Send + Sync {
    /// Stage the creation of `package`, addressable by `id` from relations
    /// staged in the same batch.
    fn stage_node(&mut self, id: CorrelationId, package: &Package);

    /// Stage a `Requires` edge between two staged packages.
    fn stage_relation(&mut self, relation: &Relation);

    /// Send every staged statement as one transaction.
    ///
    /// The batch is emptied on success and kept on a store failure, so the
    /// caller may commit again or [`discard`](DependencyStore::discard) it.
    /// A batch with an unresolved reference is dropped. Committing an empty
    /// batch does nothing.
    async fn commit(&mut self) -> Result<(), GraphError>;

    /// Drop everything staged since the last successful commit.
    fn discard(&mut self);

    /// Fetch dependency edges.
    ///
    /// With both `vendor` and `package` set, only the edges among packages on
    /// a path from a root project to that package are returned. Otherwise,
    /// including when only one of the two is set, the whole graph is returned.
    async fn query(&self, vendor: &str, package: &str) -> Result<Vec<Record>, GraphError>;

    /// Release the store. Connection lifecycle is owned by the gateway's
    /// creator, so implementations may treat this as a no-op.
    fn disconnect(&mut self);
}

/// [`DependencyStore`] over any [`StoreGateway`], Neo4j by default.
pub struct DependencyGraph<G = GraphClient> {
    gateway: G,
    pending: WriteBatch,
    options: QueryOptions,
}

impl<G: StoreGateway> DependencyGraph<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            pending: WriteBatch::new(),
            options: QueryOptions::default(),
        }
    }

    /// Use custom root label / excluded package settings for reads.
    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn pending(&self) -> &WriteBatch {
        &self.pending
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

#[async_trait]
impl<G: StoreGateway> DependencyStore for DependencyGraph<G> {
    fn stage_node(&mut self, id: CorrelationId, package: &Package) {
        self.pending.stage_node(id, package);
    }

    fn stage_relation(&mut self, relation: &Relation) {
        self.pending.stage_relation(relation);
    }

    async fn commit(&mut self) -> Result<(), GraphError> {
        self.gateway.flush(&mut self.pending).await
    }

    fn discard(&mut self) {
        tracing::debug!(
            nodes = self.pending.node_count(),
            edges = self.pending.edge_count(),
            "Discarding write batch"
        );
        self.pending.clear();
    }

    async fn query(&self, vendor: &str, package: &str) -> Result<Vec<Record>, GraphError> {
        let statement = match PathTarget::from_filter(vendor, package) {
            Some(target) => {
                tracing::debug!(vendor, package, "Querying dependency paths");
                build_bounded_path_query(&target, &self.options)
            }
            None => {
                tracing::debug!("Querying full dependency graph");
                build_full_graph_query(&self.options)
            }
        };

        let rows = self.gateway.run_query(statement).await?;
        Ok(map_records(&rows)?)
    }

    fn disconnect(&mut self) {
        tracing::debug!("Disconnect requested; connection is owned by the client");
    }
}
