//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port (binds 0.0.0.0)
    pub http_port: u16,

    /// SQLite database file path
    pub db_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: parse_var("BILL_HTTP_PORT", "8080")?,

            db_path: env::var("BILL_DB_PATH").unwrap_or_else(|_| "./bill.db".to_string()),

            db_max_connections: parse_var("BILL_DB_MAX_CONNECTIONS", "5")?,

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "bill-api-dev-secret-change-in-production".to_string()
            }),

            jwt_access_lifetime_secs: parse_var("JWT_ACCESS_LIFETIME_SECS", "3600")?, // 1 hour
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("BILL_DB_MAX_CONNECTIONS".to_string()));
        }

        if config.jwt_access_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_ACCESS_LIFETIME_SECS".to_string()));
        }

        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            db_path: "./bill.db".to_string(),
            db_max_connections: 5,
            jwt_secret: "bill-api-dev-secret-change-in-production".to_string(),
            jwt_access_lifetime_secs: 3600,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: &str) -> Result<T, ConfigError> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
