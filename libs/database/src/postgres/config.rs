use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use sea_orm::ConnectOptions;
use std::time::Duration;

/// PostgreSQL database configuration
///
/// Holds the connection URL and pool settings. Construct manually or load
/// from environment variables via [`FromEnv`].
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Connection idle timeout in seconds
    pub idle_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    /// Create a new PostgresConfig with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 60,
            sqlx_logging: false,
        }
    }

    /// Convert into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

impl FromEnv for PostgresConfig {
    /// Reads configuration from environment variables:
    /// - `DATABASE_URL` (required)
    /// - `DATABASE_MAX_CONNECTIONS` (default 20)
    /// - `DATABASE_MIN_CONNECTIONS` (default 2)
    /// - `DATABASE_CONNECT_TIMEOUT_SECS` (default 8)
    /// - `DATABASE_ACQUIRE_TIMEOUT_SECS` (default 8)
    /// - `DATABASE_IDLE_TIMEOUT_SECS` (default 60)
    /// - `DATABASE_SQLX_LOGGING` (default false)
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        let parse_u32 = |key: &str, default: &str| -> Result<u32, ConfigError> {
            env_or_default(key, default)
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        };
        let parse_u64 = |key: &str, default: &str| -> Result<u64, ConfigError> {
            env_or_default(key, default)
                .parse()
                .map_err(|e| ConfigError::ParseError {
                    key: key.to_string(),
                    details: format!("{}", e),
                })
        };

        Ok(Self {
            url,
            max_connections: parse_u32("DATABASE_MAX_CONNECTIONS", "20")?,
            min_connections: parse_u32("DATABASE_MIN_CONNECTIONS", "2")?,
            connect_timeout_secs: parse_u64("DATABASE_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: parse_u64("DATABASE_ACQUIRE_TIMEOUT_SECS", "8")?,
            idle_timeout_secs: parse_u64("DATABASE_IDLE_TIMEOUT_SECS", "60")?,
            sqlx_logging: env_or_default("DATABASE_SQLX_LOGGING", "false")
                .eq_ignore_ascii_case("true"),
        })
    }
}
