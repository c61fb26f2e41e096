//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_database_path, default_listen, default_metrics_port};

/// Environment variable overriding `server.listen`.
pub const ENV_LISTEN: &str = "BOARD_LISTEN";

/// Environment variable overriding `database.path`.
pub const ENV_DATABASE: &str = "BOARD_DATABASE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Board configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. Environment overrides are applied afterwards.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(
            std::env::var(ENV_LISTEN).ok(),
            std::env::var(ENV_DATABASE).ok(),
        )?;
        Ok(config)
    }

    /// Apply explicit overrides for the listen address and database path.
    pub fn apply_overrides(
        &mut self,
        listen: Option<String>,
        database: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(listen) = listen {
            self.server.listen = listen.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LISTEN,
                value: listen.clone(),
            })?;
        }
        if let Some(database) = database {
            self.database.path = database;
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the board API binds to (default: 127.0.0.1:5555).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Prometheus metrics HTTP port (default: 9090, 0 disables).
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_port: default_metrics_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.listen, "127.0.0.1:5555".parse().unwrap());
        assert_eq!(config.server.metrics_port, 9090);
        assert_eq!(config.database.path, "app.db");
    }

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
[server]
listen = "0.0.0.0:8080"
metrics_port = 0

[database]
path = ":memory:"
"#,
        )
        .unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.server.metrics_port, 0);
        assert_eq!(config.database.path, ":memory:");
    }

    #[test]
    fn test_bad_listen_address_fails_parse() {
        let result: Result<Config, _> = toml::from_str("[server]\nlisten = \"nope\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("127.0.0.1:7000".to_string()), Some("other.db".to_string()))
            .unwrap();
        assert_eq!(config.server.listen.port(), 7000);
        assert_eq!(config.database.path, "other.db");
    }

    #[test]
    fn test_invalid_listen_override_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(Some("not-an-addr".to_string()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_LISTEN, .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"board.db\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.path, "board.db");
        assert_eq!(config.server.listen.port(), 5555);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
