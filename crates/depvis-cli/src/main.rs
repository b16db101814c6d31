//! CLI entry point for depvis.
//!
//! `import` reads a dependency-tree JSON document and writes it to Neo4j in
//! one batch; `query` prints dependency edges as a JSON array on stdout.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use depvis::config::load_config;
use depvis::import::TreeDocument;
use depvis_graph::{DependencyGraph, DependencyStore, GraphClient};

#[derive(Parser)]
#[command(name = "depvis")]
#[command(about = "Persist and query package dependency graphs in Neo4j")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: depvis).
    #[arg(short, long, default_value = "depvis", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Import a dependency tree (JSON) from a file or stdin.
    Import {
        /// Input file; stdin when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print dependency edges, optionally only those leading to one package.
    Query {
        /// Vendor of the target package.
        #[arg(long, default_value = "")]
        vendor: String,
        /// Name of the target package.
        #[arg(long, default_value = "")]
        package: String,
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let app_config = load_config(&cli.config)?;

    let client = GraphClient::connect(&app_config.neo4j).await?;
    let mut graph = DependencyGraph::new(client).with_query_options(app_config.query);

    match cli.command {
        Command::Import { ref file } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let document = TreeDocument::from_json(&input)?;
            let summary = document.stage_into(&mut graph)?;
            graph.commit().await?;
            tracing::info!(
                packages = summary.packages,
                relations = summary.relations,
                "Dependency tree imported"
            );
        }
        Command::Query {
            ref vendor,
            ref package,
            pretty,
        } => {
            let records = graph.query(vendor, package).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{json}");
        }
    }

    graph.disconnect();
    Ok(())
}
