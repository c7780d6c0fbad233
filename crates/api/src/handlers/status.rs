use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: &'static str,
    /// `Connected` or `Disconnected`.
    pub alpaca_connection: &'static str,
    pub timestamp: String,
}

/// GET /
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let alpaca_connection = if state.broker_connected() {
        "Connected"
    } else {
        "Disconnected"
    };

    Json(StatusResponse {
        message: format!("{} is running", super::SERVICE_NAME),
        status: "active",
        alpaca_connection,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
