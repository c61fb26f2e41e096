//! Board HTTP API.
//!
//! - `/messages` - list (GET) and create (POST)
//! - `/messages/{id}` - read (GET), edit (PATCH), remove (DELETE)
//!
//! All responses are pretty-printed JSON with permissive CORS headers.

mod cors;
mod handlers;
mod payload;
pub mod response;

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{Instrument, debug};

use crate::db::Database;
use crate::telemetry::{RequestTimer, spans};

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Build the board router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/messages",
            get(handlers::list_messages).post(handlers::create_message),
        )
        .route(
            "/messages/:id",
            get(handlers::get_message)
                .patch(handlers::update_message)
                .delete(handlers::delete_message),
        )
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(cors::cors))
        .layer(middleware::from_fn(track_request))
        .with_state(state)
}

/// Wrap each request in a span and record its latency and status.
async fn track_request(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().to_string();
    let span = spans::request(&method, request.uri().path());

    let mut timer = RequestTimer::new(route, method);
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    timer.finish(status);
    span.in_scope(|| {
        debug!(
            status,
            latency_ms = timer.elapsed_secs() * 1000.0,
            "Request completed"
        );
    });
    response
}

/// Serve the board on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
