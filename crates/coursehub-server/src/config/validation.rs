//! Configuration validation.

use super::types::ServerConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JWT secret: must be at least 32 characters")]
    InvalidJwtSecret,

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid database pool size: min {min} exceeds max {max}")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),
}

pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Validate server configuration, reporting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.auth.jwt_secret.len() < 32 {
        errors.push(ConfigError::InvalidJwtSecret);
    }

    let algorithm = config.auth.algorithm.to_uppercase();
    if !SUPPORTED_ALGORITHMS.contains(&algorithm.as_str()) {
        errors.push(ConfigError::UnsupportedAlgorithm(config.auth.algorithm.clone()));
    }

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    } else if config.server.socket_addr().is_err() {
        errors.push(ConfigError::InvalidBindAddress(config.server.host.clone()));
    }

    if config.database.min_connections > config.database.max_connections {
        errors.push(ConfigError::InvalidPoolSize {
            min: config.database.min_connections,
            max: config.database.max_connections,
        });
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    let valid_formats = ["pretty", "compact", "json"];
    if !valid_formats.contains(&config.logging.format.to_lowercase().as_str()) {
        errors.push(ConfigError::InvalidLogFormat(config.logging.format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
