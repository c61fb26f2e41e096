//! Default value functions for configuration.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the board listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 5555;

pub fn default_listen() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

pub fn default_metrics_port() -> u16 {
    9090
}

pub fn default_database_path() -> String {
    "app.db".to_string()
}
