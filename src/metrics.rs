//! Prometheus metrics collection for the message board.
//!
//! Exposed on a separate HTTP listener (see [`crate::http`]).
//!
//! - `board_http_requests_total{route,method,status}` - Requests served
//! - `board_http_request_duration_seconds{route,method}` - Request latency histogram
//! - `board_messages_{created,updated,deleted}_total` - Store mutations

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{Once, OnceLock};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Messages created through POST /messages.
pub static MESSAGES_CREATED: OnceLock<IntCounter> = OnceLock::new();

/// Message bodies changed through PATCH.
pub static MESSAGES_UPDATED: OnceLock<IntCounter> = OnceLock::new();

/// Messages removed through DELETE.
pub static MESSAGES_DELETED: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// HTTP metrics
// ========================================================================

/// Requests served by route template, method and status code.
pub static HTTP_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Request latency by route template and method.
pub static HTTP_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call at startup before any metrics are recorded; until then every
/// `record_*` call is a no-op. Later calls do nothing.
pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(register_all);
}

fn register_all() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(MESSAGES_CREATED, IntCounter::new("board_messages_created_total", "Messages created"));
    register!(MESSAGES_UPDATED, IntCounter::new("board_messages_updated_total", "Message bodies edited"));
    register!(MESSAGES_DELETED, IntCounter::new("board_messages_deleted_total", "Messages deleted"));
    register!(HTTP_REQUESTS, IntCounterVec::new(
        Opts::new("board_http_requests_total", "HTTP requests by route, method and status"),
        &["route", "method", "status"]));
    register!(HTTP_LATENCY, HistogramVec::new(
        HistogramOpts::new("board_http_request_duration_seconds", "HTTP request latency by route")
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["route", "method"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a served request with its latency.
#[inline]
pub fn record_request(route: &str, method: &str, status: u16, duration_secs: f64) {
    if let Some(c) = HTTP_REQUESTS.get() {
        let status = status.to_string();
        c.with_label_values(&[route, method, status.as_str()]).inc();
    }
    if let Some(h) = HTTP_LATENCY.get() {
        h.with_label_values(&[route, method]).observe(duration_secs);
    }
}

#[inline]
pub fn record_created() {
    if let Some(c) = MESSAGES_CREATED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_updated() {
    if let Some(c) = MESSAGES_UPDATED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_deleted() {
    if let Some(c) = MESSAGES_DELETED.get() {
        c.inc();
    }
}
