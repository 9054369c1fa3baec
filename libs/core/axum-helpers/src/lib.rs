//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, router assembly, graceful shutdown
//! - **[`errors`]**: Structured error responses with stable symbolic codes
//! - **[`extractors`]**: Custom extractors (validated JSON, validated query)
//! - **[`health`]**: Health and readiness check handlers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;
pub mod shutdown;

// Re-export error types
pub use errors::ErrorObject;

// Re-export extractors
pub use extractors::{ValidatedJson, ValidatedQuery};

// Re-export server types
pub use server::{create_app, create_production_app, create_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

// Re-export health types
pub use health::{HealthCheckFuture, HealthResponse, health_handler, run_health_checks};
