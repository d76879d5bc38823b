//! Schema manager: indexes a graph schema and resolves key property names.
//!
//! All lookup structures are built once at construction. Resolution never
//! guesses: a label set declared by more than one table, or a node carrying
//! two competing unique labels, resolves to nothing.

pub mod model;

use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

use crate::entity::{Element, ElementKind, GraphElement};
use crate::error::{GraphError, GraphResult};
use model::{SchemaDescription, TypeDef};

/// Order-independent label set used as an index key.
type LabelSet = BTreeSet<String>;

/// What a label set maps to in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// Exactly one table declares this label set.
    Unique(usize),
    /// Several tables share this label set.
    Ambiguous,
}

/// Lookup structures derived from a [`SchemaDescription`].
#[derive(Debug, Clone)]
pub struct SchemaManager {
    schema: SchemaDescription,
    node_index: HashMap<LabelSet, Resolution>,
    edge_index: HashMap<LabelSet, Resolution>,
    /// Label -> node table that declares it as its whole label set.
    unique_node_labels: HashMap<String, usize>,
}

impl SchemaManager {
    /// Validate a schema and build its indices.
    pub fn new(schema: SchemaDescription) -> GraphResult<Self> {
        validate(&schema)?;

        let node_index = index_label_sets(&schema.node_tables);
        let edge_index = index_label_sets(&schema.edge_tables);

        let unique_node_labels = node_index
            .iter()
            .filter_map(|(labels, resolution)| match resolution {
                Resolution::Unique(idx) if labels.len() == 1 => {
                    labels.iter().next().map(|label| (label.clone(), *idx))
                }
                _ => None,
            })
            .collect();

        debug!(
            node_tables = schema.node_tables.len(),
            edge_tables = schema.edge_tables.len(),
            "Schema indexed"
        );

        Ok(Self {
            schema,
            node_index,
            edge_index,
            unique_node_labels,
        })
    }

    /// Parse the schema JSON returned alongside a query result.
    ///
    /// `null` means the query carried no graph schema and yields an empty one.
    pub fn from_json(value: &Value) -> GraphResult<Self> {
        if value.is_null() {
            return Self::new(SchemaDescription::default());
        }

        let schema: SchemaDescription = serde_json::from_value(value.clone())
            .map_err(|e| GraphError::schema(e.to_string()))?;
        Self::new(schema)
    }

    pub fn schema(&self) -> &SchemaDescription {
        &self.schema
    }

    /// Labels that are the entire label set of exactly one node table.
    pub fn unique_node_labels(&self) -> BTreeSet<&str> {
        self.unique_node_labels.keys().map(String::as_str).collect()
    }

    /// Find a node or edge table by name.
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.schema
            .node_tables
            .iter()
            .chain(&self.schema.edge_tables)
            .find(|def| def.name == name)
    }

    /// Resolve the single table an element belongs to, if there is one.
    pub fn resolve_type<E: GraphElement + ?Sized>(&self, element: &E) -> Option<&TypeDef> {
        match element.kind() {
            ElementKind::Node => self
                .resolve_by_unique_label(element.labels())
                .or_else(|| {
                    lookup(&self.node_index, element.labels())
                        .map(|idx| &self.schema.node_tables[idx])
                }),
            ElementKind::Edge => lookup(&self.edge_index, element.labels())
                .map(|idx| &self.schema.edge_tables[idx]),
        }
    }

    /// Key property names for an element, in the order its table declares them.
    ///
    /// Returns an empty list when the labels do not resolve to exactly one table.
    pub fn get_key_property_names<E: GraphElement + ?Sized>(&self, element: &E) -> Vec<String> {
        self.resolve_type(element)
            .map(|def| def.key_columns.clone())
            .unwrap_or_default()
    }

    /// Key property names for a dynamically typed payload.
    ///
    /// Fails with [`GraphError::TypeMismatch`] when the value is not a node
    /// or edge payload.
    pub fn key_property_names_for_value(&self, value: &Value) -> GraphResult<Vec<String>> {
        let element = Element::from_raw(value)?;
        Ok(self.get_key_property_names(&element))
    }

    fn resolve_by_unique_label(&self, labels: &[String]) -> Option<&TypeDef> {
        let hits: BTreeSet<usize> = labels
            .iter()
            .filter_map(|label| self.unique_node_labels.get(label).copied())
            .collect();

        let mut iter = hits.iter();
        match (iter.next(), iter.next()) {
            (Some(idx), None) => Some(&self.schema.node_tables[*idx]),
            (Some(_), Some(_)) => {
                debug!(?labels, "Labels match several unique node labels, leaving unresolved");
                None
            }
            _ => None,
        }
    }
}

fn validate(schema: &SchemaDescription) -> GraphResult<()> {
    let mut names = HashSet::new();

    for def in schema.node_tables.iter().chain(&schema.edge_tables) {
        if def.name.is_empty() {
            return Err(GraphError::schema("table name must not be empty"));
        }
        if !names.insert(def.name.as_str()) {
            return Err(GraphError::schema(format!("duplicate table name '{}'", def.name)));
        }
        if def.label_names.is_empty() {
            return Err(GraphError::schema(format!(
                "table '{}' must declare at least one label",
                def.name
            )));
        }
    }

    Ok(())
}

fn index_label_sets(defs: &[TypeDef]) -> HashMap<LabelSet, Resolution> {
    let mut index = HashMap::new();

    for (idx, def) in defs.iter().enumerate() {
        let labels: LabelSet = def.label_names.iter().cloned().collect();
        index
            .entry(labels)
            .and_modify(|resolution| {
                debug!(table = %def.name, "Label set shared by several tables");
                *resolution = Resolution::Ambiguous;
            })
            .or_insert(Resolution::Unique(idx));
    }

    index
}

fn lookup(index: &HashMap<LabelSet, Resolution>, labels: &[String]) -> Option<usize> {
    if labels.is_empty() {
        return None;
    }
    let key: LabelSet = labels.iter().cloned().collect();
    match index.get(&key) {
        Some(Resolution::Unique(idx)) => Some(*idx),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::model::{Edge, Node};
    use serde_json::{json, Map};

    fn table(name: &str, labels: &[&str], keys: &[&str]) -> Value {
        json!({"name": name, "labelNames": labels, "keyColumns": keys})
    }

    fn node(labels: &[&str]) -> Node {
        Node::new("1", labels.iter().map(|l| l.to_string()).collect(), Map::new())
    }

    #[test]
    fn test_null_schema_is_empty() {
        let manager = SchemaManager::from_json(&Value::Null).unwrap();
        assert_eq!(manager.schema(), &SchemaDescription::default());
        assert!(manager.unique_node_labels().is_empty());
        assert!(manager.get_key_property_names(&node(&["Person"])).is_empty());
    }

    #[test]
    fn test_duplicate_table_names_rejected() {
        let result = SchemaManager::from_json(&json!({
            "nodeTables": [table("Person", &["Person"], &["id"])],
            "edgeTables": [table("Person", &["Knows"], &["id"])]
        }));
        assert!(matches!(result, Err(GraphError::SchemaParse(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_table_without_labels_rejected() {
        let result = SchemaManager::from_json(&json!({
            "nodeTables": [table("Person", &[], &["id"])]
        }));
        assert!(matches!(result, Err(GraphError::SchemaParse(_))));
    }

    #[test]
    fn test_malformed_schema_rejected() {
        let result = SchemaManager::from_json(&json!("not a schema"));
        assert!(matches!(result, Err(GraphError::SchemaParse(_))));

        let result = SchemaManager::from_json(&json!({"nodeTables": [{"name": "Person"}]}));
        assert!(matches!(result, Err(GraphError::SchemaParse(_))));
    }

    #[test]
    fn test_key_columns_keep_declared_order() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [table("Transfer", &["Transfer"], &["to_id", "from_id", "ts"])]
        }))
        .unwrap();

        assert_eq!(
            manager.get_key_property_names(&node(&["Transfer"])),
            vec!["to_id", "from_id", "ts"]
        );
    }

    #[test]
    fn test_multi_label_table_resolves_by_exact_set() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [table("People", &["Person", "Human"], &["pid"])]
        }))
        .unwrap();

        assert!(manager.unique_node_labels().is_empty());
        assert_eq!(manager.get_key_property_names(&node(&["Human", "Person"])), vec!["pid"]);
        assert!(manager.get_key_property_names(&node(&["Person"])).is_empty());
    }

    #[test]
    fn test_competing_unique_labels_unresolved() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [
                table("Person", &["Person"], &["id"]),
                table("City", &["City"], &["name"])
            ]
        }))
        .unwrap();

        assert!(manager.get_key_property_names(&node(&["Person", "City"])).is_empty());
    }

    #[test]
    fn test_node_without_labels_unresolved() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [table("Person", &["Person"], &["id"])]
        }))
        .unwrap();

        assert!(manager.get_key_property_names(&node(&[])).is_empty());
    }

    #[test]
    fn test_edges_resolve_against_edge_tables() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [table("Account", &["Account"], &["id"])],
            "edgeTables": [
                table("Transfers", &["Transfers"], &["id", "to_id"]),
                table("Owns", &["Owns"], &["id"]),
                table("OwnsToo", &["Owns"], &["id"])
            ]
        }))
        .unwrap();

        let transfer = Edge::new("e1", "1", "2", vec!["Transfers".into()], Map::new());
        assert_eq!(manager.get_key_property_names(&transfer), vec!["id", "to_id"]);

        let owns = Edge::new("e2", "1", "2", vec!["Owns".into()], Map::new());
        assert!(manager.get_key_property_names(&owns).is_empty());

        // Node labels never leak into edge resolution.
        let mislabeled = Edge::new("e3", "1", "2", vec!["Account".into()], Map::new());
        assert!(manager.get_key_property_names(&mislabeled).is_empty());
    }

    #[test]
    fn test_type_def_lookup() {
        let manager = SchemaManager::from_json(&json!({
            "nodeTables": [table("Person", &["Person"], &["id"])],
            "edgeTables": [table("Knows", &["Knows"], &["id"])]
        }))
        .unwrap();

        assert_eq!(
            manager.type_def("Knows").map(|d| d.key_columns.clone()),
            Some(vec!["id".to_string()])
        );
        assert!(manager.type_def("Missing").is_none());
    }
}
