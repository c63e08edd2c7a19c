use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};

#[derive(Clone)]
pub struct GatewayMetrics {
    requests: Counter<u64>,
    upstream_errors: Counter<u64>,
    upstream_duration: Histogram<f64>,
}

impl GatewayMetrics {
    pub fn new(meter_name: &'static str) -> Self {
        let meter = global::meter(meter_name);
        let latency_buckets = [
            0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0,
        ];

        let requests = meter
            .u64_counter("gateway_requests_total")
            .with_description("Total detect requests received")
            .build();
        let upstream_errors = meter
            .u64_counter("gateway_upstream_errors_total")
            .with_description("Detect requests that did not produce an upstream result")
            .build();
        let upstream_duration = meter
            .f64_histogram("gateway_upstream_duration_seconds")
            .with_description("Round trip to the inference service")
            .with_unit("s")
            .with_boundaries(latency_buckets.to_vec())
            .build();

        Self {
            requests,
            upstream_errors,
            upstream_duration,
        }
    }

    pub fn record_request(&self) {
        self.requests.add(1, &[]);
    }

    pub fn record_upstream(&self, elapsed_secs: f64, outcome: &'static str) {
        self.upstream_duration
            .record(elapsed_secs, &[KeyValue::new("outcome", outcome)]);
        if outcome != "ok" {
            self.upstream_errors
                .add(1, &[KeyValue::new("outcome", outcome)]);
        }
    }
}
