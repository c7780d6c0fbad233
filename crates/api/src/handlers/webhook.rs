//! Handler for incoming trading signals.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use wheelbot_broker::OrderOutcome;
use wheelbot_core::signal::{Action, WebhookPayload, WebhookSignal};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Body returned for a processed signal.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    pub message: String,
    /// The signal after normalization.
    pub signal: WebhookSignal,
    pub result: TradeResult,
    pub timestamp: String,
}

/// What was done for the signal.
#[derive(Debug, Serialize)]
pub struct TradeResult {
    pub action: Action,
    pub symbol: String,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub premium: f64,
    pub quantity: u32,
    /// `null` when no broker is connected.
    pub alpaca_order: Option<OrderOutcome>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /webhook
///
/// Validates the signal against today's local date, logs the trade and,
/// when a broker is connected, records a simulated option order.
pub async fn process_webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> AppResult<Json<WebhookResponse>> {
    let Json(payload) = payload?;
    tracing::info!(?payload, "Received webhook signal");

    let today = chrono::Local::now().date_naive();
    let signal = payload.validate(today)?;

    let result = execute_signal(&state, &signal);

    Ok(Json(WebhookResponse {
        status: "success",
        message: format!("Successfully processed {} signal", signal.action),
        signal,
        result,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Log the trade and hand it to the broker if one is connected.
fn execute_signal(state: &AppState, signal: &WebhookSignal) -> TradeResult {
    tracing::info!(action = %signal.action, symbol = %signal.symbol, "{}", signal.describe());

    let alpaca_order = match &state.broker {
        Some(broker) => Some(broker.place_option_order(signal)),
        None => {
            tracing::debug!("No broker connected, skipping order");
            None
        }
    };

    TradeResult {
        action: signal.action,
        symbol: signal.symbol.clone(),
        strike: signal.strike,
        expiry: signal.expiry,
        premium: signal.premium,
        quantity: signal.quantity,
        alpaca_order,
    }
}
