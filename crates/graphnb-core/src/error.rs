//! Centralized error types for graph materialization.

use thiserror::Error;

/// Main error type for schema and entity handling.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The schema description is malformed. Always fatal to the build.
    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    /// A single node or edge payload is missing required fields.
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    /// A value that is neither a node nor an edge was used as one.
    #[error("Type mismatch: expected a node or edge, got {0}")]
    TypeMismatch(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a schema parse error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaParse(msg.into())
    }

    /// Create an invalid entity error.
    pub fn invalid_entity(msg: impl Into<String>) -> Self {
        Self::InvalidEntity(msg.into())
    }
}
