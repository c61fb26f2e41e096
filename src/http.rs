//! HTTP server for the Prometheus metrics endpoint.
//!
//! Serves `/metrics` on its own port so scrapes never share the board's listener.

use axum::{Router, response::IntoResponse, routing::get};
use http::header;
use std::net::{IpAddr, SocketAddr};

/// GET /metrics - Prometheus text exposition format.
async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        crate::metrics::gather_metrics(),
    )
}

fn metrics_router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Run the metrics server on `ip:port`.
///
/// Long-running; spawn it in the background. Bind failures are logged and
/// end the task without affecting the board API.
pub async fn run_metrics_server(ip: IpAddr, port: u16) {
    let addr = SocketAddr::new(ip, port);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind metrics server");
            return;
        }
    };
    tracing::info!(%addr, "Prometheus HTTP server listening");

    if let Err(e) = axum::serve(listener, metrics_router()).await {
        tracing::error!(error = %e, "Metrics server error");
    }
}
