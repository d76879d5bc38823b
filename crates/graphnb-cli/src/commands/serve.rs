//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use graphnb_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::GraphnbConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Fixture JSON answering every query
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: &GraphnbConfig) -> Result<()> {
    let db = super::load_fixture(args.fixture.as_deref(), config).await?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    println!();
    println!("  {} {}", "graphnb".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Visualization".green(), host, port);
    println!("  {}          http://{}:{}/post_query", "Query".green(), host, port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let state = AppState::new(Arc::new(db), config.render.clone());
    graphnb_web::run_server(state, &host, port).await?;

    Ok(())
}
