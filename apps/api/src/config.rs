use core_config::{ConfigError, Environment, FromEnv, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

/// Top-level application configuration
#[derive(Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    /// Insert demo tasks on startup when the table is empty
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            seed_demo_data: env_or_default("SEED_DEMO_DATA", "true").eq_ignore_ascii_case("true"),
        })
    }
}
