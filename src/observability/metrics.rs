//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mockwire_requests_total` (counter): requests by method, status, matched
//! - `mockwire_request_duration_seconds` (histogram): dispatch latency
//! - `mockwire_activations_total` (counter): nested routes by outcome
//! - `mockwire_registered_routes` (gauge): current registry size
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, matched: bool, start_time: Instant) {
    counter!(
        "mockwire_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "matched" => if matched { "true" } else { "false" }
    )
    .increment(1);
    histogram!("mockwire_request_duration_seconds", "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

pub fn record_activations(outcome: &'static str, count: usize) {
    counter!("mockwire_activations_total", "outcome" => outcome).increment(count as u64);
}

pub fn record_registry_size(size: usize) {
    gauge!("mockwire_registered_routes").set(size as f64);
}
