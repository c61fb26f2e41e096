//! Telemetry utilities for request timing and spans.

use std::time::Instant;

/// Guard for timing one HTTP request and recording metrics.
///
/// Records latency and final status when dropped, so requests that end in
/// an error path are still counted.
pub struct RequestTimer {
    route: String,
    method: String,
    status: u16,
    start: Instant,
}

impl RequestTimer {
    /// Start timing a request.
    pub fn new(route: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            method: method.into(),
            // Overwritten once a response exists; a dropped future counts as 500.
            status: 500,
            start: Instant::now(),
        }
    }

    /// Set the response status to record.
    pub fn finish(&mut self, status: u16) {
        self.status = status;
    }

    /// Seconds since the timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        crate::metrics::record_request(&self.route, &self.method, self.status, self.elapsed_secs());
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one HTTP request.
    pub fn request(method: &str, path: &str) -> Span {
        info_span!("request", method = %method, path = %path)
    }
}
