//! depvis-graph: Neo4j persistence for package dependency graphs.
//!
//! Packages and their "requires" relations are staged into a write batch and
//! flushed as one statement. Reads return either the whole dependency graph
//! or the bounded-depth path subgraph between root projects and one package,
//! mapped back into typed records.

pub mod client;
pub mod gateway;
pub mod mapper;
pub mod mutations;
pub mod queries;
pub mod service;
pub mod statement;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use gateway::StoreGateway;
pub use mapper::{MappingError, RawProjection, RawRow};
pub use mutations::WriteBatch;
pub use queries::{PathTarget, QueryOptions};
pub use service::{DependencyGraph, DependencyStore};
pub use statement::Statement;
