use std::time::Duration;

use axum::Router;
use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_tasks::{PgTaskRepository, TaskService};
use eyre::WrapErr;
use migration::Migrator;
use tracing::info;

mod config;
mod openapi;
mod routes;
mod seed;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .wrap_err("Failed to connect to database")?;

    run_migrations::<Migrator>(&db, "todoops")
        .await
        .wrap_err("Failed to run migrations")?;

    let repository = PgTaskRepository::new(db.clone());

    if config.seed_demo_data {
        seed::seed_demo_data(&repository)
            .await
            .wrap_err("Failed to seed demo data")?;
    }

    let service = TaskService::new(repository);

    // Domain routers apply their own state; the app only composes them
    let api_routes = Router::new().nest("/v1/tasks", domain_tasks::handlers::router(service));

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    // /health: liveness; /ready: readiness with an actual database check
    let app = router.merge(routes::ready_router(db.clone()));

    info!("Starting todoops API with production-ready shutdown (30s timeout)");

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .wrap_err("Server error")?;

    info!("todoops API shutdown complete");
    Ok(())
}
