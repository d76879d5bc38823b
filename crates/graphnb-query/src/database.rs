//! Database abstraction and a fixture-backed implementation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{QueryError, QueryResult};
use crate::result::{Field, ResultSet};

/// A graph database that can run a query and describe its graph schema.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run a query and return its rows together with the schema JSON.
    async fn execute_query(&self, query: &str) -> QueryResult<ResultSet>;
}

/// On-disk fixture: either row-oriented or columnar data.
#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    fields: Vec<Field>,
    rows: Option<Vec<Map<String, Value>>>,
    columns: Option<Map<String, Value>>,
    #[serde(default)]
    schema: Option<Value>,
}

/// Answers every query with the same recorded result.
///
/// Used for notebooks without a live database, demos, and tests.
#[derive(Debug, Clone)]
pub struct FixtureDatabase {
    result: ResultSet,
}

impl FixtureDatabase {
    pub fn new(result: ResultSet) -> Self {
        Self { result }
    }

    /// Build from a fixture document.
    ///
    /// Accepts `{"rows": [...]}` or `{"columns": {...}}`, each with an
    /// optional `schema` and `fields`.
    pub fn from_value(value: Value) -> QueryResult<Self> {
        let fixture: Fixture = serde_json::from_value(value)?;

        let mut result = match (fixture.rows, fixture.columns) {
            (Some(rows), None) => ResultSet {
                fields: Vec::new(),
                rows,
                schema: fixture.schema,
            },
            (None, Some(columns)) => ResultSet::from_columns(&columns, fixture.schema)?,
            (Some(_), Some(_)) => {
                return Err(QueryError::InvalidResult(
                    "fixture must contain either 'rows' or 'columns', not both".to_string(),
                ))
            }
            (None, None) => ResultSet {
                schema: fixture.schema,
                ..ResultSet::default()
            },
        };

        if !fixture.fields.is_empty() {
            result.fields = fixture.fields;
        }

        Ok(Self::new(result))
    }

    /// Load a fixture document from a JSON file.
    pub async fn load(path: &Path) -> QueryResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let db = Self::from_value(serde_json::from_str(&content)?)?;
        debug!(path = %path.display(), rows = db.result.rows.len(), "Fixture loaded");
        Ok(db)
    }
}

#[async_trait]
impl Database for FixtureDatabase {
    async fn execute_query(&self, query: &str) -> QueryResult<ResultSet> {
        if query.trim().is_empty() {
            return Err(QueryError::Execution("query is empty".to_string()));
        }

        info!(query, rows = self.result.rows.len(), "Answering query from fixture");
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_row_fixture() {
        let db = FixtureDatabase::from_value(json!({
            "rows": [{"n": 1}, {"n": 2}],
            "schema": {"nodeTables": []}
        }))
        .unwrap();

        let result = db.execute_query("GRAPH FinGraph MATCH (n) RETURN n").await.unwrap();
        assert_eq!(result.rows.len(), 2);
        assert!(result.schema.is_some());
    }

    #[tokio::test]
    async fn test_columnar_fixture_keeps_declared_fields() {
        let db = FixtureDatabase::from_value(json!({
            "fields": [{"name": "n", "type": "JSON"}],
            "columns": {"n": [1, 2, 3]}
        }))
        .unwrap();

        let result = db.execute_query("MATCH (n) RETURN n").await.unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.fields[0].type_name, "JSON");
    }

    #[tokio::test]
    async fn test_empty_query_fails() {
        let db = FixtureDatabase::new(ResultSet::default());
        assert!(matches!(db.execute_query("  ").await, Err(QueryError::Execution(_))));
    }

    #[test]
    fn test_rows_and_columns_conflict() {
        let result = FixtureDatabase::from_value(json!({"rows": [], "columns": {}}));
        assert!(matches!(result, Err(QueryError::InvalidResult(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": [{{"n": 1}}]}}"#).unwrap();

        let db = FixtureDatabase::load(file.path()).await.unwrap();
        let result = db.execute_query("RETURN 1").await.unwrap();
        assert_eq!(result.rows.len(), 1);
        assert!(result.schema.is_none());
    }
}
