//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inertia_responses_total` (counter): responses by kind (json, html, conflict, redirect)
//! - `inertia_ssr_failures_total` (counter): SSR calls that fell back to client rendering

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_response(kind: &'static str) {
    metrics::counter!("inertia_responses_total", "kind" => kind).increment(1);
}

pub fn record_ssr_failure() {
    metrics::counter!("inertia_ssr_failures_total").increment(1);
}
