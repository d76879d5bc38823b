//! Entity model: nodes, edges, and the capability they share.

pub mod model;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{GraphError, GraphResult};
use model::{type_name, Edge, Node};

/// Keys that mark a payload as an edge, in both spellings.
const EDGE_ENDPOINT_KEYS: &[&str] = &[
    "sourceNodeIdentifier",
    "source_node_identifier",
    "destinationNodeIdentifier",
    "destination_node_identifier",
];

/// Which side of the schema an element resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Node,
    Edge,
}

/// Capability shared by everything the schema can resolve key properties for.
pub trait GraphElement {
    fn kind(&self) -> ElementKind;
    fn identifier(&self) -> &str;
    fn labels(&self) -> &[String];
    fn properties(&self) -> &Map<String, Value>;
}

impl GraphElement for Node {
    fn kind(&self) -> ElementKind {
        ElementKind::Node
    }

    fn identifier(&self) -> &str {
        Node::identifier(self)
    }

    fn labels(&self) -> &[String] {
        Node::labels(self)
    }

    fn properties(&self) -> &Map<String, Value> {
        Node::properties(self)
    }
}

impl GraphElement for Edge {
    fn kind(&self) -> ElementKind {
        ElementKind::Edge
    }

    fn identifier(&self) -> &str {
        Edge::identifier(self)
    }

    fn labels(&self) -> &[String] {
        Edge::labels(self)
    }

    fn properties(&self) -> &Map<String, Value> {
        Edge::properties(self)
    }
}

/// A node or an edge decoded from a dynamic payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

impl Element {
    /// Decide whether a raw value is a node or edge payload.
    ///
    /// An explicit `kind` field wins. Without one, any object carrying an
    /// `identifier` is an entity, and it is an edge when it names either endpoint.
    /// Returns `None` for scalars and for objects that are not entities.
    pub fn classify(value: &Value) -> Option<ElementKind> {
        let obj = value.as_object()?;

        if let Some(kind) = obj.get("kind").and_then(Value::as_str) {
            return match kind.to_ascii_lowercase().as_str() {
                "node" => Some(ElementKind::Node),
                "edge" => Some(ElementKind::Edge),
                _ => None,
            };
        }

        if !obj.contains_key("identifier") {
            return None;
        }

        if EDGE_ENDPOINT_KEYS.iter().any(|key| obj.contains_key(*key)) {
            Some(ElementKind::Edge)
        } else {
            Some(ElementKind::Node)
        }
    }

    /// Decode a dynamic payload into a node or an edge.
    ///
    /// Fails with [`GraphError::TypeMismatch`] when the value is not an entity
    /// payload at all, and with [`GraphError::InvalidEntity`] when it is one
    /// but lacks required fields.
    pub fn from_raw(value: &Value) -> GraphResult<Self> {
        match Self::classify(value) {
            Some(ElementKind::Node) => Node::from_raw(value).map(Self::Node),
            Some(ElementKind::Edge) => Edge::from_raw(value).map(Self::Edge),
            None => Err(GraphError::TypeMismatch(describe(value))),
        }
    }
}

impl GraphElement for Element {
    fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Edge(_) => ElementKind::Edge,
        }
    }

    fn identifier(&self) -> &str {
        match self {
            Self::Node(n) => n.identifier(),
            Self::Edge(e) => e.identifier(),
        }
    }

    fn labels(&self) -> &[String] {
        match self {
            Self::Node(n) => n.labels(),
            Self::Edge(e) => e.labels(),
        }
    }

    fn properties(&self) -> &Map<String, Value> {
        match self {
            Self::Node(n) => n.properties(),
            Self::Edge(e) => e.properties(),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {:?}", s),
        other => type_name(other).to_string(),
    }
}
