//! Query result shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};

/// Column metadata reported by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
}

/// Rows, column metadata, and the graph schema for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub schema: Option<Value>,
}

impl ResultSet {
    /// Build a result set from columnar data (column name -> values).
    pub fn from_columns(columns: &Map<String, Value>, schema: Option<Value>) -> QueryResult<Self> {
        let fields = columns
            .keys()
            .map(|name| Field {
                name: name.clone(),
                type_name: String::new(),
            })
            .collect();

        Ok(Self {
            fields,
            rows: columns_to_rows(columns)?,
            schema,
        })
    }

    /// Rows as JSON values, ready for the graph builder.
    pub fn row_values(&self) -> Vec<Value> {
        self.rows.iter().cloned().map(Value::Object).collect()
    }
}

/// Transpose columnar data into row mappings.
///
/// Every column must be an array and all arrays must have the same length.
pub fn columns_to_rows(columns: &Map<String, Value>) -> QueryResult<Vec<Map<String, Value>>> {
    let mut len = None;
    let mut arrays = Vec::with_capacity(columns.len());

    for (name, values) in columns {
        let values = values.as_array().ok_or_else(|| {
            QueryError::InvalidResult(format!("column '{}' is not an array", name))
        })?;

        match len {
            None => len = Some(values.len()),
            Some(expected) if expected != values.len() => {
                return Err(QueryError::InvalidResult(format!(
                    "column '{}' has {} values, expected {}",
                    name,
                    values.len(),
                    expected
                )));
            }
            Some(_) => {}
        }

        arrays.push((name, values));
    }

    let rows = (0..len.unwrap_or(0))
        .map(|i| {
            arrays
                .iter()
                .map(|(name, values)| ((*name).clone(), values[i].clone()))
                .collect()
        })
        .collect();

    Ok(rows)
}
