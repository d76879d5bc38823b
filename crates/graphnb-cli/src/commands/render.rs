//! Render the visualization page to a file or stdout.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;

use crate::config::GraphnbConfig;

#[derive(Args)]
pub struct RenderArgs {
    /// Query the page will run
    pub query: String,

    /// Query endpoint the page posts to
    #[arg(long)]
    pub url: Option<String>,

    /// JSON object forwarded to the endpoint with the query
    #[arg(long, default_value = "{}")]
    pub params: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn execute(args: RenderArgs, config: &GraphnbConfig) -> Result<()> {
    let params: Value = serde_json::from_str(&args.params).context("--params must be valid JSON")?;
    let url = args.url.unwrap_or_else(|| {
        format!("http://{}:{}/post_query", config.server.host, config.server.port)
    });

    let html =
        graphnb_web::generate_visualization_html(&config.render, &args.query, &url, &params)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
