//! Prometheus metrics for nlp-service.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; this
//! module adds upstream provider metrics and owns the exporter handle.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one upstream call. `outcome` is `ok` or an error kind.
pub fn record_provider_call(operation: &'static str, outcome: &'static str, latency: Duration) {
    counter!(
        "nlp_provider_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("nlp_provider_latency_seconds", "operation" => operation)
        .record(latency.as_secs_f64());
}

pub fn record_tokens(operation: &'static str, input: u32, output: u32) {
    counter!("nlp_tokens_total", "operation" => operation, "type" => "input")
        .increment(u64::from(input));
    counter!("nlp_tokens_total", "operation" => operation, "type" => "output")
        .increment(u64::from(output));
}
