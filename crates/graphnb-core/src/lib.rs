//! graphnb core library
//!
//! Turns the rows of a property-graph query into a typed, directed graph.
//!
//! The schema returned by the database is indexed once by [`SchemaManager`],
//! raw payloads become [`Node`] and [`Edge`] values, and [`build_graph`]
//! assembles them into a [`QueryGraph`] annotated with key property names.

pub mod entity;
pub mod error;
pub mod graph;
pub mod schema;

pub use entity::model::{Edge, Node};
pub use entity::{Element, ElementKind, GraphElement};
pub use error::{GraphError, GraphResult};
pub use graph::model::{BuildReport, GraphEdge, GraphNode, SkippedEntity};
pub use graph::{build_graph, build_graph_from_json, QueryGraph};
pub use schema::model::{PropertyDefinition, SchemaDescription, TypeDef};
pub use schema::SchemaManager;
