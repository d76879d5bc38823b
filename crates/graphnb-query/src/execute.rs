//! Query execution: database rows in, visualization payload out.

use graphnb_core::{build_graph_from_json, BuildReport, GraphEdge, GraphNode};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::database::Database;
use crate::error::QueryResult;
use crate::result::Field;

/// Everything the front end needs to draw a query result.
#[derive(Debug, Clone, Serialize)]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub schema: Option<Value>,
    pub fields: Vec<Field>,
    pub rows: Vec<Map<String, Value>>,
    pub diagnostics: BuildReport,
}

/// Response envelope: `{"response": {...}}` or `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResponse {
    Response(GraphResponse),
    Error(String),
}

impl QueryResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Run a query and build its graph.
///
/// Never fails: query errors and schema errors are folded into
/// [`QueryResponse::Error`]. Malformed rows only show up in the diagnostics.
pub async fn execute_query(db: &dyn Database, query: &str) -> QueryResponse {
    match run(db, query).await {
        Ok(response) => QueryResponse::Response(response),
        Err(e) => {
            warn!(error = %e, "Query visualization failed");
            QueryResponse::Error(e.to_string())
        }
    }
}

async fn run(db: &dyn Database, query: &str) -> QueryResult<GraphResponse> {
    let result = db.execute_query(query).await?;
    let schema = result.schema.clone().unwrap_or(Value::Null);
    let graph = build_graph_from_json(&result.row_values(), &schema)?;

    Ok(GraphResponse {
        nodes: graph.nodes().cloned().collect(),
        edges: graph.edges().cloned().collect(),
        diagnostics: graph.report().clone(),
        schema: result.schema,
        fields: result.fields,
        rows: result.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::FixtureDatabase;
    use serde_json::json;

    fn fixture(schema: Value) -> FixtureDatabase {
        FixtureDatabase::from_value(json!({
            "rows": [{
                "a": {
                    "kind": "node",
                    "identifier": "p1",
                    "labels": ["Person"],
                    "properties": {"id": 1}
                },
                "b": {
                    "kind": "node",
                    "identifier": "p2",
                    "labels": ["Person"],
                    "properties": {"id": 2}
                },
                "e": {
                    "kind": "edge",
                    "identifier": "k1",
                    "source_node_identifier": "p1",
                    "destination_node_identifier": "p2",
                    "labels": ["Knows"],
                    "properties": {}
                }
            }],
            "schema": schema
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_response_envelope() {
        let db = fixture(json!({
            "nodeTables": [{"name": "Person", "labelNames": ["Person"], "keyColumns": ["id"]}],
            "edgeTables": [{"name": "Knows", "labelNames": ["Knows"], "keyColumns": ["id"]}]
        }));

        let response = execute_query(&db, "MATCH p = (a)-[e]->(b) RETURN p").await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["response"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["response"]["nodes"][0]["keyPropertyNames"], json!(["id"]));
        assert_eq!(value["response"]["edges"][0]["sourceNodeIdentifier"], json!("p1"));
        assert_eq!(value["response"]["rows"].as_array().unwrap().len(), 1);
        assert!(value["response"]["diagnostics"]["skipped"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_error_becomes_error_envelope() {
        let db = fixture(json!({"nodeTables": [{"name": "Person"}]}));

        let response = execute_query(&db, "MATCH (n) RETURN n").await;
        assert!(response.is_error());

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["error"].as_str().unwrap().contains("Schema parse error"));
    }

    #[tokio::test]
    async fn test_query_error_becomes_error_envelope() {
        let db = fixture(Value::Null);
        let response = execute_query(&db, "").await;
        assert!(matches!(response, QueryResponse::Error(msg) if msg.contains("empty")));
    }

    #[tokio::test]
    async fn test_missing_schema_still_builds_graph() {
        let db = fixture(Value::Null);
        let response = execute_query(&db, "MATCH (n) RETURN n").await;

        match response {
            QueryResponse::Response(graph) => {
                assert_eq!(graph.nodes.len(), 2);
                assert!(graph.nodes.iter().all(|n| n.key_property_names.is_empty()));
                assert!(graph.schema.is_none());
            }
            QueryResponse::Error(e) => panic!("unexpected error: {}", e),
        }
    }
}
