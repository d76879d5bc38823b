//! Schema description models.
//!
//! Mirrors the JSON the database returns for a property graph:
//! `{"nodeTables": [...], "edgeTables": [...]}`.

use serde::{Deserialize, Serialize};

/// A graph schema: node and edge table declarations in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    #[serde(default)]
    pub node_tables: Vec<TypeDef>,
    #[serde(default)]
    pub edge_tables: Vec<TypeDef>,
}

/// A named declaration mapping a set of labels and key columns to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub name: String,
    pub label_names: Vec<String>,
    pub key_columns: Vec<String>,
    #[serde(default)]
    pub property_definitions: Vec<PropertyDefinition>,
}

/// A declared property and the expression that produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub property_declaration_name: String,
    pub value_expression_sql: String,
}

impl TypeDef {
    /// Look up the source expression of a declared property.
    pub fn property_expression(&self, name: &str) -> Option<&str> {
        self.property_definitions
            .iter()
            .find(|def| def.property_declaration_name == name)
            .map(|def| def.value_expression_sql.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let schema: SchemaDescription = serde_json::from_value(json!({
            "catalog": "",
            "name": "FinGraph",
            "nodeTables": [{
                "name": "Person",
                "baseTableName": "Person",
                "kind": "NODE",
                "labelNames": ["Person"],
                "keyColumns": ["id"],
                "propertyDefinitions": [
                    {"propertyDeclarationName": "name", "valueExpressionSql": "full_name"}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(schema.node_tables.len(), 1);
        assert!(schema.edge_tables.is_empty());
        assert_eq!(schema.node_tables[0].property_expression("name"), Some("full_name"));
        assert_eq!(schema.node_tables[0].property_expression("age"), None);
    }

    #[test]
    fn test_missing_key_columns_is_rejected() {
        let result: Result<SchemaDescription, _> = serde_json::from_value(json!({
            "nodeTables": [{"name": "Person", "labelNames": ["Person"]}]
        }));
        assert!(result.is_err());
    }
}
