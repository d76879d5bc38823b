//! Build a graph from files on disk.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use graphnb_core::{build_graph, QueryGraph, SchemaManager};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct BuildArgs {
    /// Schema JSON file (`{"nodeTables": [...], "edgeTables": [...]}`)
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Rows JSON file (an array of row objects)
    #[arg(long)]
    pub rows: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    let schema_json = match &args.schema {
        Some(path) => read_json(path)?,
        None => Value::Null,
    };
    let rows = match read_json(&args.rows)? {
        Value::Array(rows) => rows,
        other => bail!("Rows file must contain a JSON array, found {}", kind_of(&other)),
    };

    let schema = SchemaManager::from_json(&schema_json).context("Invalid graph schema")?;
    let graph = build_graph(&rows, &schema);

    let output = graph_json(&graph);
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }

    let report = graph.report();
    if !report.is_clean() {
        eprintln!(
            "{} {} entities skipped",
            "warning:".yellow().bold(),
            report.skipped.len()
        );
        for skipped in &report.skipped {
            eprintln!(
                "  {} row {} {}: {}",
                "→".dimmed(),
                skipped.row,
                skipped.column.as_deref().unwrap_or("-").cyan(),
                skipped.reason
            );
        }
    }

    Ok(())
}

pub(crate) fn graph_json(graph: &QueryGraph) -> Value {
    json!({
        "nodes": graph.nodes().collect::<Vec<_>>(),
        "edges": graph.edges().collect::<Vec<_>>(),
        "diagnostics": graph.report(),
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "an object",
        Value::Array(_) => "an array",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
    }
}
