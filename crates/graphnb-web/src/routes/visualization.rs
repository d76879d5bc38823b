//! Visualization page handler.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use serde_json::json;

use crate::render::generate_visualization_html;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VisualizeParams {
    #[serde(default)]
    pub query: String,
}

/// GET / - render the visualization page for a query.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<VisualizeParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let html = generate_visualization_html(&state.render, &params.query, "/post_query", &json!({}))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Html(html))
}
