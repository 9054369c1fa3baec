use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::health::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};
use serde_json::Value;

/// Readiness endpoint backed by an actual database round-trip.
///
/// `/health` (wired by `create_router`) only says the process is up; this
/// one is what the orchestrator should gate traffic on.
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready_handler)).with_state(db)
}

async fn ready_handler(
    State(db): State<DatabaseConnection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}
