//! Graph output models.

use serde::Serialize;

use crate::entity::model::{Edge, Node};

/// A node annotated with the key property names its table declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[serde(flatten)]
    pub node: Node,
    pub key_property_names: Vec<String>,
}

/// An edge annotated with the key property names its table declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(flatten)]
    pub edge: Edge,
    pub key_property_names: Vec<String>,
}

/// An entity the builder could not place in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntity {
    pub row: usize,
    pub column: Option<String>,
    pub identifier: Option<String>,
    pub reason: String,
}

/// Diagnostics collected while building a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub rows: usize,
    pub duplicate_nodes: usize,
    pub duplicate_edges: usize,
    pub skipped: Vec<SkippedEntity>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
