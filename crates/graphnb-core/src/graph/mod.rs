//! Graph builder: materializes query rows into a typed, directed graph.

pub mod model;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::entity::model::{Edge, Node};
use crate::entity::Element;
use crate::error::GraphResult;
use crate::schema::SchemaManager;
use model::{BuildReport, GraphEdge, GraphNode, SkippedEntity};

/// Directed multigraph of query entities keyed by identifier.
///
/// Nodes and edges keep insertion order; re-inserting a known identifier is
/// a no-op, so the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct QueryGraph {
    graph: DiGraph<GraphNode, GraphEdge>,
    node_indices: HashMap<String, NodeIndex>,
    edge_ids: HashSet<String>,
    report: BuildReport,
}

impl QueryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Returns `false` when the identifier was already present.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.node_indices.contains_key(node.node.identifier()) {
            return false;
        }
        let identifier = node.node.identifier().to_string();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(identifier, idx);
        true
    }

    /// Insert an edge between two known nodes.
    ///
    /// Returns `Ok(false)` for a duplicate identifier and an
    /// `InvalidEntity` error when either endpoint is missing.
    pub fn insert_edge(&mut self, edge: GraphEdge) -> GraphResult<bool> {
        if self.edge_ids.contains(edge.edge.identifier()) {
            return Ok(false);
        }

        let source = self.endpoint(edge.edge.source_node_identifier())?;
        let destination = self.endpoint(edge.edge.destination_node_identifier())?;

        self.edge_ids.insert(edge.edge.identifier().to_string());
        self.graph.add_edge(source, destination, edge);
        Ok(true)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.graph.edge_weights()
    }

    pub fn node(&self, identifier: &str) -> Option<&GraphNode> {
        self.node_indices.get(identifier).map(|idx| &self.graph[*idx])
    }

    pub fn contains_edge(&self, identifier: &str) -> bool {
        self.edge_ids.contains(identifier)
    }

    /// Edges leaving a node, newest first (petgraph adjacency order).
    pub fn outgoing_edges<'a>(&'a self, identifier: &str) -> Vec<&'a GraphEdge> {
        self.node_indices
            .get(identifier)
            .map(|idx| {
                self.graph
                    .edges_directed(*idx, Direction::Outgoing)
                    .map(|edge| edge.weight())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Diagnostics from the build that produced this graph.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    fn endpoint(&self, identifier: &str) -> GraphResult<NodeIndex> {
        self.node_indices.get(identifier).copied().ok_or_else(|| {
            crate::error::GraphError::invalid_entity(format!(
                "edge endpoint '{}' is not a node in the result",
                identifier
            ))
        })
    }
}

/// Where an entity was found in the result set.
struct Located<T> {
    row: usize,
    column: String,
    entity: T,
}

/// Build a graph from rows and a parsed schema.
///
/// Malformed payloads are skipped and reported; they never abort the build.
/// Every node is inserted before any edge so that edge endpoints can appear
/// later in a row than the edge itself.
pub fn build_graph(rows: &[Value], schema: &SchemaManager) -> QueryGraph {
    let mut graph = QueryGraph::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    graph.report.rows = rows.len();

    for (row_idx, row) in rows.iter().enumerate() {
        let Some(columns) = row.as_object() else {
            skip(&mut graph.report, row_idx, None, None, "row is not an object");
            continue;
        };

        for (column, value) in columns {
            let mut payloads = Vec::new();
            collect_payloads(value, &mut payloads);

            for payload in payloads {
                match Element::from_raw(payload) {
                    Ok(Element::Node(node)) => nodes.push(Located {
                        row: row_idx,
                        column: column.clone(),
                        entity: node,
                    }),
                    Ok(Element::Edge(edge)) => edges.push(Located {
                        row: row_idx,
                        column: column.clone(),
                        entity: edge,
                    }),
                    Err(e) => {
                        let identifier = payload
                            .get("identifier")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        skip(&mut graph.report, row_idx, Some(column), identifier, &e.to_string());
                    }
                }
            }
        }
    }

    for Located { entity, .. } in nodes {
        insert_node(&mut graph, schema, entity);
    }

    for Located { row, column, entity } in edges {
        insert_edge(&mut graph, schema, row, column, entity);
    }

    info!(
        rows = graph.report.rows,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        skipped = graph.report.skipped.len(),
        "Graph built"
    );

    graph
}

/// Parse a schema JSON and build a graph.
///
/// Schema errors are fatal; row errors are reported on the returned graph.
pub fn build_graph_from_json(rows: &[Value], schema_json: &Value) -> GraphResult<QueryGraph> {
    let schema = SchemaManager::from_json(schema_json)?;
    Ok(build_graph(rows, &schema))
}

fn insert_node(graph: &mut QueryGraph, schema: &SchemaManager, node: Node) {
    if graph.node(node.identifier()).is_some() {
        graph.report.duplicate_nodes += 1;
        return;
    }

    let key_property_names = schema.get_key_property_names(&node);
    graph.insert_node(GraphNode {
        node,
        key_property_names,
    });
}

fn insert_edge(
    graph: &mut QueryGraph,
    schema: &SchemaManager,
    row: usize,
    column: String,
    edge: Edge,
) {
    if graph.contains_edge(edge.identifier()) {
        graph.report.duplicate_edges += 1;
        return;
    }

    let identifier = edge.identifier().to_string();
    let key_property_names = schema.get_key_property_names(&edge);

    if let Err(e) = graph.insert_edge(GraphEdge {
        edge,
        key_property_names,
    }) {
        skip(&mut graph.report, row, Some(&column), Some(identifier), &e.to_string());
    }
}

/// Flatten a column value into entity payloads. Paths arrive as arrays.
fn collect_payloads<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_payloads(item, out);
            }
        }
        other if Element::classify(other).is_some() => out.push(other),
        _ => {}
    }
}

fn skip(
    report: &mut BuildReport,
    row: usize,
    column: Option<&String>,
    identifier: Option<String>,
    reason: &str,
) {
    debug!(row, ?column, ?identifier, reason, "Skipping entity");
    report.skipped.push(SkippedEntity {
        row,
        column: column.cloned(),
        identifier,
        reason: reason.to_string(),
    });
}
