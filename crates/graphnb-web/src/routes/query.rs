//! Query route handler.

use axum::{extract::State, Json};
use graphnb_query::QueryResponse;
use serde::Deserialize;
use serde_json::Value;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct PostQueryRequest {
    pub query: String,
    #[serde(default)]
    pub params: Value,
}

/// POST /post_query - run a query and return the graph envelope.
///
/// Failures are reported inside the envelope as `{"error": ...}`.
pub async fn post_query(
    State(state): State<AppState>,
    Json(req): Json<PostQueryRequest>,
) -> Json<QueryResponse> {
    tracing::debug!(params = %req.params, "Received query");
    Json(graphnb_query::execute_query(state.db.as_ref(), &req.query).await)
}
