//! message-board - a minimal message board backend.
//!
//! Stores short text messages with an author and timestamps in SQLite and
//! exposes them as REST over JSON.

mod api;
mod config;
mod db;
mod error;
mod http;
mod metrics;
mod telemetry;

use crate::api::AppState;
use crate::config::Config;
use crate::db::Database;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load_with_env(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        listen = %config.server.listen,
        database = %config.database.path,
        "Starting message-board"
    );

    let db = Database::new(&config.database.path).await?;
    info!(count = db.messages().count().await?, "Loaded messages");

    // Convention: metrics_port = 0 disables the metrics endpoint (used by tests).
    let metrics_port = config.server.metrics_port;
    if metrics_port == 0 {
        info!("Metrics disabled");
    } else {
        metrics::init();
        let ip = config.server.listen.ip();
        tokio::spawn(async move {
            http::run_metrics_server(ip, metrics_port).await;
        });
    }

    let listener = tokio::net::TcpListener::bind(config.server.listen).await?;
    info!(addr = %listener.local_addr()?, "Board API listening");

    api::serve(listener, AppState::new(db.clone()), shutdown_signal()).await?;

    info!("Shutting down");
    db.close().await;
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
