//! Configuration for the depvis CLI.

use serde::Deserialize;

use depvis_graph::{GraphConfig, QueryOptions};

/// Top-level configuration.
///
/// Loaded from `depvis.toml` (`[neo4j]` and `[query]` sections) and
/// `DEPVIS__` environment variables, e.g. `DEPVIS__NEO4J__PASSWORD`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub neo4j: GraphConfig,
    pub query: QueryOptions,
}

/// Load configuration, environment overriding the file. The file is optional.
pub fn load_config(file_prefix: &str) -> crate::error::Result<AppConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("DEPVIS")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(cfg.try_deserialize()?)
}
