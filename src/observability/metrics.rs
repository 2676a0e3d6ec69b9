//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_navigation_duration_seconds` (histogram): end-to-end latency
//! - `router_redirects_total` (counter): redirect hops followed
//! - `router_loader_calls_total` (counter): loader calls by loader, result
//! - `router_loader_duration_seconds` (histogram): loader latency by loader

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_navigation(outcome: &'static str, start: Instant) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
    histogram!("router_navigation_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_redirect() {
    counter!("router_redirects_total").increment(1);
}

pub fn record_loader(loader: &str, ok: bool, start: Instant) {
    let result = if ok { "ok" } else { "error" };
    counter!(
        "router_loader_calls_total",
        "loader" => loader.to_string(),
        "result" => result
    )
    .increment(1);
    histogram!("router_loader_duration_seconds", "loader" => loader.to_string())
        .record(start.elapsed().as_secs_f64());
}
