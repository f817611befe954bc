/// Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Database connectivity
    pub database: String,

    /// Service version
    pub version: String,
}

/// GET /health
///
/// Always returns 200; a broken database shows up as "degraded" in the body
/// so load balancers keep routing while operators see the problem.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("Health check database error: {}", e);
            "disconnected".to_string()
        }
    };

    let status = if database == "connected" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        version: bookvault_shared::VERSION.to_string(),
    })
}
