//! Statement execution against the backing graph store.
//!
//! [`StoreGateway`] is the seam between statement building and the store.
//! [`GraphClient`] implements it over Neo4j; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::client::{GraphClient, GraphError};
use crate::mapper::{MappingError, RawProjection, RawRow};
use crate::mutations::WriteBatch;
use crate::queries::{RELATIONSHIP_COLUMN, SOURCE_COLUMN, TARGET_COLUMN};
use crate::statement::Statement;

/// Executes statements against a graph store.
///
/// Store failures are returned unchanged; nothing is retried.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Execute one write statement as a single transaction.
    async fn execute(&self, statement: Statement) -> Result<(), GraphError>;

    /// Execute one read statement and return its rows in store order.
    async fn run_query(&self, statement: Statement) -> Result<Vec<RawRow>, GraphError>;

    /// Execute everything pending in `batch` as one unit, then empty it.
    ///
    /// An empty batch is a no-op. A batch with an unresolved reference can
    /// never succeed and is dropped; on a store failure it is left untouched.
    async fn flush(&self, batch: &mut WriteBatch) -> Result<(), GraphError> {
        let statement = match batch.to_statement() {
            Ok(Some(statement)) => statement,
            Ok(None) => return Ok(()),
            Err(e) => {
                batch.clear();
                return Err(e);
            }
        };
        tracing::debug!(
            nodes = batch.node_count(),
            edges = batch.edge_count(),
            "Flushing write batch"
        );
        self.execute(statement).await?;
        batch.clear();
        Ok(())
    }
}

#[async_trait]
impl StoreGateway for GraphClient {
    async fn execute(&self, statement: Statement) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        txn.run(statement.into_query()).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn run_query(&self, statement: Statement) -> Result<Vec<RawRow>, GraphError> {
        let rows = self.query_rows(statement.into_query()).await?;
        tracing::debug!(rows = rows.len(), "Query returned");
        let raw = rows
            .iter()
            .map(row_to_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(raw)
    }
}

fn row_to_raw(row: &neo4rs::Row) -> Result<RawRow, MappingError> {
    Ok(RawRow::new(
        column(row, SOURCE_COLUMN)?,
        column(row, RELATIONSHIP_COLUMN)?,
        column(row, TARGET_COLUMN)?,
    ))
}

fn column(row: &neo4rs::Row, name: &str) -> Result<RawProjection, MappingError> {
    row.get::<RawProjection>(name)
        .map_err(|e| MappingError::MissingColumn {
            column: name.to_string(),
            reason: e.to_string(),
        })
}
