//! Run a query against a fixture database.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::GraphnbConfig;

#[derive(Args)]
pub struct QueryArgs {
    /// Query text
    pub query: String,

    /// Fixture JSON answering the query
    #[arg(long)]
    pub fixture: Option<PathBuf>,
}

pub async fn execute(args: QueryArgs, config: &GraphnbConfig) -> Result<()> {
    let db = super::load_fixture(args.fixture.as_deref(), config).await?;
    let response = graphnb_query::execute_query(&db, &args.query).await;

    println!("{}", serde_json::to_string(&response)?);

    if response.is_error() {
        bail!("Query did not produce a graph");
    }
    Ok(())
}
