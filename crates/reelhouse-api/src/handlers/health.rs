use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// `GET /health`: liveness plus a cheap store round trip.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status_code, status, database) = match state.videos.get(Uuid::nil()).await {
        Ok(_) => (StatusCode::OK, "healthy", "healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: video store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unhealthy")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
