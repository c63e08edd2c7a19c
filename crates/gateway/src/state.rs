use crate::{metrics::GatewayMetrics, upstream::UpstreamClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub metrics: GatewayMetrics,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
            metrics: GatewayMetrics::new("gateway"),
        }
    }
}
