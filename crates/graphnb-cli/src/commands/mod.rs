//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphnb_query::FixtureDatabase;
use std::path::{Path, PathBuf};

use crate::config::GraphnbConfig;

pub mod build;
pub mod query;
pub mod render;
pub mod serve;

/// graphnb - visualize property-graph query results
#[derive(Parser)]
#[command(name = "graphnb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a graphnb.toml config file
    #[arg(short, long, global = true, env = "GRAPHNB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a graph from a schema file and a rows file
    Build(build::BuildArgs),

    /// Run a query against a fixture and print the response envelope
    Query(query::QueryArgs),

    /// Render the visualization page for a query
    Render(render::RenderArgs),

    /// Start the visualization web server
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = GraphnbConfig::load(self.config.as_deref())?;
        tracing::debug!(?config, "Configuration loaded");

        match self.command {
            Commands::Build(args) => build::execute(args),
            Commands::Query(args) => query::execute(args, &config).await,
            Commands::Render(args) => render::execute(args, &config),
            Commands::Serve(args) => serve::execute(args, &config).await,
        }
    }
}

/// Resolve the fixture from a flag or the config file and load it.
pub(crate) async fn load_fixture(
    flag: Option<&Path>,
    config: &GraphnbConfig,
) -> Result<FixtureDatabase> {
    let path = flag
        .or(config.fixture.as_deref())
        .context("No fixture given. Pass --fixture or set 'fixture' in graphnb.toml.")?;

    FixtureDatabase::load(path)
        .await
        .with_context(|| format!("Failed to load fixture {}", path.display()))
}
