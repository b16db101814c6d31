//! depvis: command-line front end for the dependency graph store.
//!
//! Loads layered configuration, imports dependency-tree documents into
//! Neo4j and prints query results as JSON.

pub mod config;
pub mod error;
pub mod import;
