//! Node and edge value objects.

use serde::Serialize;
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

use crate::error::{GraphError, GraphResult};

/// A graph node as returned by a query.
///
/// Immutable once decoded. Two nodes are equal when their identifiers are.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    identifier: String,
    labels: Vec<String>,
    properties: Map<String, Value>,
}

/// A directed graph edge as returned by a query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    identifier: String,
    source_node_identifier: String,
    destination_node_identifier: String,
    labels: Vec<String>,
    properties: Map<String, Value>,
}

impl Node {
    pub fn new(
        identifier: impl Into<String>,
        labels: Vec<String>,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            labels,
            properties,
        }
    }

    /// Decode a node from a raw query payload.
    ///
    /// `identifier` and `labels` are required; a missing `properties`
    /// mapping decodes as empty.
    pub fn from_raw(record: &Value) -> GraphResult<Self> {
        let obj = as_record(record, "node")?;
        Ok(Self {
            identifier: required_string(obj, &["identifier"])?,
            labels: required_labels(obj)?,
            properties: optional_properties(obj)?,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

impl Edge {
    pub fn new(
        identifier: impl Into<String>,
        source_node_identifier: impl Into<String>,
        destination_node_identifier: impl Into<String>,
        labels: Vec<String>,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            source_node_identifier: source_node_identifier.into(),
            destination_node_identifier: destination_node_identifier.into(),
            labels,
            properties,
        }
    }

    /// Decode an edge from a raw query payload.
    ///
    /// Endpoint identifiers are accepted in camelCase or snake_case.
    pub fn from_raw(record: &Value) -> GraphResult<Self> {
        let obj = as_record(record, "edge")?;
        Ok(Self {
            identifier: required_string(obj, &["identifier"])?,
            source_node_identifier: required_string(
                obj,
                &["sourceNodeIdentifier", "source_node_identifier"],
            )?,
            destination_node_identifier: required_string(
                obj,
                &["destinationNodeIdentifier", "destination_node_identifier"],
            )?,
            labels: required_labels(obj)?,
            properties: optional_properties(obj)?,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn source_node_identifier(&self) -> &str {
        &self.source_node_identifier
    }

    pub fn destination_node_identifier(&self) -> &str {
        &self.destination_node_identifier
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

fn as_record<'a>(record: &'a Value, kind: &str) -> GraphResult<&'a Map<String, Value>> {
    record.as_object().ok_or_else(|| {
        GraphError::invalid_entity(format!(
            "{} payload must be an object, got {}",
            kind,
            type_name(record)
        ))
    })
}

/// First present key among `names`.
fn lookup<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| obj.get(*name))
}

fn required_string(obj: &Map<String, Value>, names: &[&str]) -> GraphResult<String> {
    match lookup(obj, names) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(GraphError::invalid_entity(format!(
            "'{}' must be a string, got {}",
            names[0],
            type_name(other)
        ))),
        None => Err(GraphError::invalid_entity(format!("missing '{}'", names[0]))),
    }
}

fn required_labels(obj: &Map<String, Value>) -> GraphResult<Vec<String>> {
    let labels = obj
        .get("labels")
        .ok_or_else(|| GraphError::invalid_entity("missing 'labels'"))?
        .as_array()
        .ok_or_else(|| GraphError::invalid_entity("'labels' must be an array"))?;

    labels
        .iter()
        .map(|label| {
            label
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| GraphError::invalid_entity("'labels' must contain only strings"))
        })
        .collect()
}

fn optional_properties(obj: &Map<String, Value>) -> GraphResult<Map<String, Value>> {
    match obj.get("properties") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(props)) => Ok(props.clone()),
        Some(other) => Err(GraphError::invalid_entity(format!(
            "'properties' must be an object, got {}",
            type_name(other)
        ))),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
