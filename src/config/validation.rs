//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::path::Path;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("database.path must not be empty")]
    EmptyDatabasePath,
    #[error("database.path parent directory does not exist: {0}")]
    DatabasePathInvalid(String),
    #[error("server.metrics_port {0} collides with the listen port")]
    MetricsPortCollision(u16),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let db_path = config.database.path.as_str();
    if db_path.is_empty() {
        errors.push(ValidationError::EmptyDatabasePath);
    } else if db_path != ":memory:"
        && let Some(parent) = Path::new(db_path).parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        errors.push(ValidationError::DatabasePathInvalid(db_path.to_string()));
    }

    let metrics_port = config.server.metrics_port;
    if metrics_port != 0 && metrics_port == config.server.listen.port() {
        errors.push(ValidationError::MetricsPortCollision(metrics_port));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_memory_database_passes() {
        let config: Config = toml::from_str("[database]\npath = \":memory:\"\n").unwrap();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_database_path_fails() {
        let config: Config = toml::from_str("[database]\npath = \"\"\n").unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyDatabasePath)));
    }

    #[test]
    fn test_missing_database_directory_fails() {
        let config: Config =
            toml::from_str("[database]\npath = \"/nonexistent/dir/board.db\"\n").unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DatabasePathInvalid(_))));
    }

    #[test]
    fn test_all_errors_reported() {
        let toml = r#"
[server]
listen = "127.0.0.1:9100"
metrics_port = 9100

[database]
path = "/nonexistent/dir/board.db"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MetricsPortCollision(9100))));
    }

    #[test]
    fn test_disabled_metrics_never_collides() {
        let config: Config =
            toml::from_str("[server]\nlisten = \"127.0.0.1:0\"\nmetrics_port = 0\n").unwrap();
        assert!(validate(&config).is_ok());
    }
}
