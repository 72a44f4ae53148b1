//! Prometheus recorder shared by every service.
//!
//! Services record through the `metrics` facade macros; this module owns the
//! exporter handle used to render `GET /metrics`.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
            tracing::info!("Prometheus metrics initialized");
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one call to a model backend.
pub fn record_inference(backend: &str, status: &str, duration_secs: f64) {
    let labels = [
        ("backend", backend.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("inference_requests_total", &labels).increment(1);
    metrics::histogram!("inference_latency_seconds", "backend" => backend.to_string())
        .record(duration_secs);
}
