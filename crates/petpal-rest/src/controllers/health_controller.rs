//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process can answer.
    pub status: &'static str,
    /// Application version.
    pub version: &'static str,
    /// Listings currently held in the post cache.
    pub cached_listings: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness))
        .route("/live", get(readiness))
}

/// Health check with cache occupancy.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        cached_listings: state.forum_service.cached_entries(),
    })
}

/// Readiness and liveness check.
///
/// Nothing needs warming up, and a Reddit outage shows up as 502s on the
/// forum route, so both routes answer 200 whenever the server is up.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready")
    )
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}
