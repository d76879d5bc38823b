//! Router tests against a fixture database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use graphnb_query::FixtureDatabase;
use graphnb_web::{create_router, AppState, RenderConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn state() -> AppState {
    let db = FixtureDatabase::from_value(json!({
        "rows": [{
            "n": {"identifier": "p1", "labels": ["Person"], "properties": {"id": 1}}
        }],
        "schema": {
            "nodeTables": [{"name": "Person", "labelNames": ["Person"], "keyColumns": ["id"]}]
        }
    }))
    .unwrap();

    let render = RenderConfig {
        template_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"),
        background_image: None,
    };

    AppState::new(Arc::new(db), render)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_query_returns_graph_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/post_query")
        .header("content-type", "application/json")
        .body(Body::from(json!({"query": "MATCH (n) RETURN n", "params": {}}).to_string()))
        .unwrap();

    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["response"]["nodes"][0]["identifier"], json!("p1"));
    assert_eq!(body["response"]["nodes"][0]["keyPropertyNames"], json!(["id"]));
}

#[tokio::test]
async fn post_query_reports_errors_in_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/post_query")
        .header("content-type", "application/json")
        .body(Body::from(json!({"query": ""}).to_string()))
        .unwrap();

    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn index_renders_the_bundled_template() {
    let request = Request::builder()
        .uri("/?query=MATCH%20(n)%20RETURN%20n")
        .body(Body::empty())
        .unwrap();

    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("\"MATCH (n) RETURN n\""));
    assert!(html.contains("\"/post_query\""));
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = create_router(state()).oneshot(request).await.unwrap();
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}
