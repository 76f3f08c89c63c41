//! Prometheus export for request and registry counters.

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once at startup, before any
/// metric is recorded; a second call is ignored.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
            return;
        }
    };

    if METRICS_HANDLE.set(handle).is_err() {
        tracing::warn!("Metrics handle already initialized");
        return;
    }

    describe_counter!(
        "registry_programs_created_total",
        "Programs created through the API"
    );
    describe_counter!(
        "registry_clients_registered_total",
        "Clients registered through the API"
    );
    describe_counter!(
        "registry_enrollment_changes_total",
        "Enrollment writes, labelled by operation"
    );
    describe_counter!(
        "registry_cascade_removals_total",
        "Client records cleaned up after a program deletion"
    );
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
