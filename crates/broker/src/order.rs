//! Option order payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wheelbot_core::signal::{OptionType, WebhookSignal};

/// Status reported for orders that were logged rather than submitted.
pub const STATUS_SIMULATED: &str = "simulated";

/// A sell-to-open option order derived from a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub client_order_id: Uuid,
    pub symbol: String,
    pub option_type: OptionType,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub premium: f64,
    pub quantity: u32,
    pub side: String,
    pub order_type: String,
    pub time_in_force: String,
}

impl OrderDetails {
    /// Market sell order, good for the day.
    pub fn for_signal(signal: &WebhookSignal) -> Self {
        Self {
            client_order_id: Uuid::new_v4(),
            symbol: signal.symbol.clone(),
            option_type: signal.action.option_type(),
            strike: signal.strike,
            expiry: signal.expiry,
            premium: signal.premium,
            quantity: signal.quantity,
            side: "sell".into(),
            order_type: "market".into(),
            time_in_force: "day".into(),
        }
    }
}

/// Result of [`AlpacaClient::place_option_order`](crate::AlpacaClient::place_option_order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOutcome {
    pub status: String,
    pub order_details: OrderDetails,
    pub message: String,
}
