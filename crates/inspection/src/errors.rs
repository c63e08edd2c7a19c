use crate::camera::FacingMode;
use thiserror::Error;

pub const CAMERA_FAILURE_MESSAGE: &str = "Unable to access camera. Please check permissions.";
pub const ANALYSIS_FAILURE_MESSAGE: &str = "Error analyzing image. Please try again.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("No camera available facing {0}")]
    Unavailable(FacingMode),

    #[error("Camera access denied")]
    PermissionDenied,

    #[error("Camera device error: {0}")]
    Device(String),

    #[error("Camera is not active")]
    Inactive,
}

impl CameraError {
    pub fn user_message(&self) -> &'static str {
        CAMERA_FAILURE_MESSAGE
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Proxy returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    /// Message shown inline on the page.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Status { status, message } => {
                format!("Error analyzing image (status {status}): {message}")
            }
            _ => ANALYSIS_FAILURE_MESSAGE.to_string(),
        }
    }
}
