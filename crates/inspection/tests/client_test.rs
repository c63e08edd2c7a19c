use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use inspection::{AnalysisError, DetectClient, HttpDetectClient, ImageData};
use schema::Prediction;
use serde_json::json;

/// Accepts only multipart uploads carrying a `file` field.
async fn detect(headers: HeaderMap, body: Bytes) -> (StatusCode, Json<serde_json::Value>) {
    let is_multipart = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data; boundary="));
    let has_file_field = String::from_utf8_lossy(&body).contains("name=\"file\"");

    if !is_multipart || !has_file_field {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "no file" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "predictions": [
                { "bbox": [0, 0, 10, 10], "class": "bad_weld", "confidence": 0.92 }
            ]
        })),
    )
}

async fn spawn_proxy() -> String {
    let app = Router::new()
        .route("/api/detect", post(detect))
        .route("/empty", post(|| async { Json(json!({ "status": "done" })) }))
        .route(
            "/unavailable",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Upstream service returned status 503" })),
                )
            }),
        )
        .route("/garbage", post(|| async { "<html>oops</html>" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn detect_at(url: String) -> Result<Vec<Prediction>, AnalysisError> {
    let image = ImageData::new("weld.jpg", "image/jpeg", vec![0xffu8, 0xd8, 0xff]);
    tokio::task::spawn_blocking(move || HttpDetectClient::new(url).detect(&image))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn parses_predictions_from_proxy() {
    let base = spawn_proxy().await;

    let predictions = detect_at(format!("{base}/api/detect")).await.unwrap();

    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].class, "bad_weld");
    assert_eq!(predictions[0].bbox, [0.0, 0.0, 10.0, 10.0]);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_predictions_field_is_an_empty_result() {
    let base = spawn_proxy().await;

    let predictions = detect_at(format!("{base}/empty")).await.unwrap();

    assert!(predictions.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_carries_code_and_message() {
    let base = spawn_proxy().await;

    let err = detect_at(format!("{base}/unavailable")).await.unwrap_err();

    assert_eq!(
        err,
        AnalysisError::Status {
            status: 503,
            message: "Upstream service returned status 503".to_string(),
        }
    );
    assert!(err.user_message().contains("503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unparseable_body_is_malformed() {
    let base = spawn_proxy().await;

    let err = detect_at(format!("{base}/garbage")).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Malformed(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_proxy_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = detect_at(format!("http://{addr}/api/detect")).await.unwrap_err();

    assert!(matches!(err, AnalysisError::Network(_)));
}
