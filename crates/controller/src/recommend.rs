//! Next-trade recommendation.

use chrono::NaiveDate;
use wheelbot_core::calendar::next_expiry;
use wheelbot_core::signal::{round_cents, Action, WebhookSignal};
use wheelbot_core::wheel::{recommended_action, WheelState};

pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_PUT_STRIKE: f64 = 180.0;
pub const DEFAULT_PUT_PREMIUM: f64 = 1.50;
pub const DEFAULT_CALL_STRIKE: f64 = 190.0;
pub const DEFAULT_CALL_PREMIUM: f64 = 1.75;
pub const DEFAULT_CONTRACTS: u32 = 1;

/// Strikes and premiums to quote for each leg of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePlan {
    pub symbol: String,
    pub put_strike: f64,
    pub put_premium: f64,
    pub call_strike: f64,
    pub call_premium: f64,
    pub quantity: u32,
}

impl Default for TradePlan {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.into(),
            put_strike: DEFAULT_PUT_STRIKE,
            put_premium: DEFAULT_PUT_PREMIUM,
            call_strike: DEFAULT_CALL_STRIKE,
            call_premium: DEFAULT_CALL_PREMIUM,
            quantity: DEFAULT_CONTRACTS,
        }
    }
}

/// Signal for the next leg, expiring on the next monthly expiry.
///
/// Returns `None` when the wheel has nothing to sell in `state`.
pub fn build_signal(state: WheelState, plan: &TradePlan, today: NaiveDate) -> Option<WebhookSignal> {
    let action = recommended_action(state)?;
    let (strike, premium) = match action {
        Action::SellPut => (plan.put_strike, plan.put_premium),
        Action::SellCall => (plan.call_strike, plan.call_premium),
    };

    Some(WebhookSignal {
        action,
        symbol: plan.symbol.to_uppercase(),
        strike: round_cents(strike),
        expiry: next_expiry(today),
        premium: round_cents(premium),
        quantity: plan.quantity,
    })
}
