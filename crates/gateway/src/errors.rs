use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schema::ErrorBody;
use std::io;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Failed to process image";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Upstream service returned status {0}")]
    UpstreamStatus(u16),

    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// The upstream body could not be read or decoded as JSON.
    #[error("Failed to read upstream response body: {0}")]
    UpstreamBody(#[from] io::Error),

    #[error("Forwarding task failed: {0}")]
    Task(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            GatewayError::UpstreamStatus(_) => {
                tracing::warn!(status = status.as_u16(), "Upstream rejected image");
                ErrorBody::new(self.to_string())
            }
            _ => {
                tracing::error!(error = %self, "Failed to forward image");
                ErrorBody::new(GENERIC_FAILURE)
            }
        };

        (status, Json(body)).into_response()
    }
}
