use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::handlers::SERVICE_NAME;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the Alpaca account check succeeded at startup.
    pub alpaca_connected: bool,
    pub timestamp: String,
    pub endpoints: EndpointIndex,
}

/// Map of the routes this service exposes.
#[derive(Serialize)]
pub struct EndpointIndex {
    pub webhook: &'static str,
    pub status: &'static str,
    pub health: &'static str,
}

/// GET /health -- detailed service health.
///
/// The service is healthy without a broker; orders are then skipped.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME,
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        alpaca_connected: state.broker_connected(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        endpoints: EndpointIndex {
            webhook: "/webhook (POST)",
            status: "/ (GET)",
            health: "/health (GET)",
        },
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
