//! depvis-core: Shared types and error handling for the dependency visualiser.
//!
//! This crate provides the foundational types used across all depvis components:
//! - Write-side inputs (Package, Relation) staged into the graph store
//! - Read-side results (Node, Relationship, Record) reconstructed from queries
//! - Validation errors raised before any store interaction

pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::{CorrelationId, Node, Package, Record, Relation, Relationship};
