//! Query layer errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query failed: {0}")]
    Execution(String),

    #[error("Invalid result: {0}")]
    InvalidResult(String),

    #[error(transparent)]
    Graph(#[from] graphnb_core::GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
