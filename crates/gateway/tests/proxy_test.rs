use axum::{
    Json, Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use gateway::{AppState, UpstreamClient, router};
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "----weldinspectionboundary";

fn multipart_body() -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"weld.jpg\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(&[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn echo_predict(headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    Json(json!({
        "predictions": [
            { "bbox": [0, 0, 10, 10], "class": "bad_weld", "confidence": 0.92 }
        ],
        "content_type": content_type,
        "body": body.to_vec(),
    }))
}

/// Spawn a fake inference service and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/predict", post(echo_predict))
        .route(
            "/unavailable",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        )
        .route("/garbage", post(|| async { "definitely not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn post_detect(upstream_url: String, max_body_bytes: usize, body: Vec<u8>) -> (StatusCode, Value) {
    let app = router(AppState::new(UpstreamClient::new(upstream_url)), max_body_bytes);

    let request = Request::builder()
        .method("POST")
        .uri("/api/detect")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test(flavor = "multi_thread")]
async fn relays_upstream_json_unchanged() {
    let base = spawn_upstream().await;
    let body = multipart_body();

    let (status, value) = post_detect(format!("{base}/predict"), 1024 * 1024, body.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["predictions"][0]["class"], "bad_weld");
    assert_eq!(value["predictions"][0]["confidence"], 0.92);
    assert_eq!(
        value["content_type"],
        format!("multipart/form-data; boundary={BOUNDARY}"),
        "Content-Type with boundary should be forwarded"
    );

    let echoed: Vec<u8> = serde_json::from_value(value["body"].clone()).unwrap();
    assert_eq!(echoed, body, "Body should be forwarded byte-for-byte");
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_status_is_propagated() {
    let base = spawn_upstream().await;

    let (status, value) =
        post_detect(format!("{base}/unavailable"), 1024 * 1024, multipart_body()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(value, json!({ "error": "Upstream service returned status 503" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_upstream_body_is_generic_500() {
    let base = spawn_upstream().await;

    let (status, value) =
        post_detect(format!("{base}/garbage"), 1024 * 1024, multipart_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({ "error": "Failed to process image" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_upstream_is_generic_500() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, value) =
        post_detect(format!("http://{addr}/predict"), 1024 * 1024, multipart_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({ "error": "Failed to process image" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_body_is_rejected_before_forwarding() {
    let base = spawn_upstream().await;

    let (status, _) = post_detect(format!("{base}/predict"), 16, multipart_body()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router(
        AppState::new(UpstreamClient::new("http://127.0.0.1:9/predict")),
        1024,
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
