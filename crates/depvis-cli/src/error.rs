//! Error types for the depvis CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid dependency tree: {0}")]
    Validation(#[from] depvis_core::ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] depvis_graph::GraphError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
