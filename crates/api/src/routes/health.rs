use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"OK"` when the database answers, `"DEGRADED"` otherwise.
    pub status: &'static str,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
///
/// Always 200 so load balancers can tell "process up, DB down" apart from
/// "process down"; inspect `db_healthy` for the store.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = techflow_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check: database unreachable");
    }

    let (status, message) = if db_healthy {
        ("OK", "Server is running")
    } else {
        ("DEGRADED", "Database is unreachable")
    };

    Json(HealthResponse {
        status,
        message,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
