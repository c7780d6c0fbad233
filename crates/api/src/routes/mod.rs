pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the signal-processing route tree.
///
/// ```text
/// /            service status (GET)
/// /webhook     process a trading signal (POST)
/// ```
pub fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::status::status))
        .route("/webhook", post(handlers::webhook::process_webhook))
}
