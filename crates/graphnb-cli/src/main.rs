//! graphnb CLI
//!
//! Builds, renders, and serves graphs from property-graph query results.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Cli;

/// Initialize tracing on stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "graphnb=debug,graphnb_core=debug,graphnb_query=debug,graphnb_web=debug"
    } else {
        "graphnb=info,graphnb_core=info,graphnb_query=info,graphnb_web=debug"
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute().await
}
