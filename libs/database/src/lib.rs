//! PostgreSQL connector and utilities for the task backend.
//!
//! Provides pooled connection management (SeaORM), startup retry with
//! exponential backoff, migration running, and a health check for
//! readiness probes.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "todoops-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
