use crate::errors::GatewayError;
use serde_json::Value;

/// Blocking HTTP client for the inference service.
///
/// Requests are sent once; there is no retry and no timeout beyond the
/// agent's defaults.
#[derive(Clone)]
pub struct UpstreamClient {
    agent: ureq::Agent,
    url: String,
}

impl UpstreamClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST `body` unchanged and parse the upstream JSON reply.
    pub fn forward(&self, content_type: Option<&str>, body: &[u8]) -> Result<Value, GatewayError> {
        let mut request = self.agent.post(&self.url);
        if let Some(content_type) = content_type {
            request = request.set("Content-Type", content_type);
        }

        match request.send_bytes(body) {
            Ok(response) => {
                let value = response.into_json::<Value>()?;
                Ok(value)
            }
            Err(ureq::Error::Status(code, _)) => Err(GatewayError::UpstreamStatus(code)),
            Err(ureq::Error::Transport(transport)) => {
                Err(GatewayError::Transport(transport.to_string()))
            }
        }
    }
}
