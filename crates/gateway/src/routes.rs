use crate::{errors::GatewayError, state::AppState};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, header::CONTENT_TYPE},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const DETECT_PATH: &str = "/api/detect";

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(DETECT_PATH, post(detect))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Relay a multipart upload to the inference service and return its JSON.
async fn detect(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    state.metrics.record_request();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    tracing::debug!(
        bytes = body.len(),
        content_type = ?content_type,
        upstream = state.upstream.url(),
        "Forwarding image"
    );

    let upstream = state.upstream.clone();
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        upstream.forward(content_type.as_deref(), &body)
    })
    .await
    .map_err(|e| GatewayError::Task(e.to_string()))
    .and_then(|forwarded| forwarded);

    let outcome = match &result {
        Ok(_) => "ok",
        Err(GatewayError::UpstreamStatus(_)) => "status",
        Err(_) => "failure",
    };
    state
        .metrics
        .record_upstream(start.elapsed().as_secs_f64(), outcome);

    result.map(Json)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
