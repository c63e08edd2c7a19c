use crate::{errors::AnalysisError, media::ImageData};
use schema::{ErrorBody, InferenceResponse, Prediction};

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Submits an image to the proxy route and returns its predictions.
pub trait DetectClient: Send + Sync + 'static {
    fn detect(&self, image: &ImageData) -> Result<Vec<Prediction>, AnalysisError>;
}

#[derive(Clone)]
pub struct HttpDetectClient {
    agent: ureq::Agent,
    url: String,
}

impl HttpDetectClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DetectClient for HttpDetectClient {
    fn detect(&self, image: &ImageData) -> Result<Vec<Prediction>, AnalysisError> {
        let boundary = format!("----inspection{:016x}", fastrand::u64(..));
        let body = multipart_body(image, &boundary);

        tracing::debug!(
            url = %self.url,
            file = image.file_name(),
            bytes = image.bytes().len(),
            "Submitting image"
        );

        let response = self
            .agent
            .post(&self.url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .send_bytes(&body);

        match response {
            Ok(response) => response
                .into_json::<InferenceResponse>()
                .map(InferenceResponse::into_predictions)
                .map_err(|e| AnalysisError::Malformed(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map(|body| body.error)
                    .unwrap_or_else(|_| format!("HTTP error! status: {status}"));
                Err(AnalysisError::Status { status, message })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(AnalysisError::Network(transport.to_string()))
            }
        }
    }
}

/// Encode `image` as a `multipart/form-data` body with a single file field.
pub fn multipart_body(image: &ImageData, boundary: &str) -> Vec<u8> {
    let file_name: String = image
        .file_name()
        .chars()
        .map(|c| match c {
            '"' | '\r' | '\n' => '_',
            c => c,
        })
        .collect();

    let mut body = Vec::with_capacity(image.bytes().len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", image.mime_type()).as_bytes());
    body.extend_from_slice(image.bytes());
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
