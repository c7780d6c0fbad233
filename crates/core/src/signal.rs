//! Trading signals received by the webhook.
//!
//! [`WebhookPayload`] is the raw JSON body as posted by an external
//! alerting tool or the wheel controller. [`WebhookPayload::validate`]
//! normalizes it into a [`WebhookSignal`], reporting every failing field
//! at once.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Upper bound for a strike price.
pub const MAX_STRIKE: f64 = 10_000.0;

/// Upper bound for an option premium.
pub const MAX_PREMIUM: f64 = 1_000.0;

/// Contracts traded when the payload does not say.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Wire format of the expiry date.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,10}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Action / option type
// ---------------------------------------------------------------------------

/// Trade requested by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SellPut,
    SellCall,
}

/// Every accepted action name, in wire format.
pub const VALID_ACTIONS: &[&str] = &["sell_put", "sell_call"];

impl Action {
    /// Parse an action name, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "sell_put" => Some(Self::SellPut),
            "sell_call" => Some(Self::SellCall),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SellPut => "sell_put",
            Self::SellCall => "sell_call",
        }
    }

    pub fn option_type(self) -> OptionType {
        match self {
            Self::SellPut => OptionType::Put,
            Self::SellCall => OptionType::Call,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Put,
    Call,
}

impl OptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Call => "call",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload / signal
// ---------------------------------------------------------------------------

/// Raw webhook body before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub action: String,
    pub symbol: String,
    pub strike: f64,
    pub expiry: String,
    pub premium: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// A validated and normalized trading signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSignal {
    pub action: Action,
    /// Upper-case ticker.
    pub symbol: String,
    /// Rounded to cents.
    pub strike: f64,
    pub expiry: NaiveDate,
    /// Rounded to cents.
    pub premium: f64,
    pub quantity: u32,
}

impl WebhookPayload {
    /// Validate and normalize the payload.
    ///
    /// `today` is the reference date for the expiry check; the expiry must
    /// fall strictly after it. All field errors are collected into a single
    /// [`CoreError::Validation`], each prefixed with its field name.
    pub fn validate(self, today: NaiveDate) -> Result<WebhookSignal, CoreError> {
        let mut errors: Vec<String> = Vec::new();

        let action = Action::parse(&self.action);
        if action.is_none() {
            errors.push(format!(
                "action: Action must be one of: {}",
                VALID_ACTIONS.join(", ")
            ));
        }

        if !SYMBOL_RE.is_match(&self.symbol) {
            errors.push(
                "symbol: Symbol must contain only letters and be 1-10 characters long".into(),
            );
        }

        let strike = check_price(self.strike, MAX_STRIKE, "Strike price")
            .map_err(|e| errors.push(format!("strike: {e}")))
            .ok();

        let expiry = check_expiry(&self.expiry, today)
            .map_err(|e| errors.push(format!("expiry: {e}")))
            .ok();

        let premium = check_price(self.premium, MAX_PREMIUM, "Premium")
            .map_err(|e| errors.push(format!("premium: {e}")))
            .ok();

        let quantity = match self.quantity {
            None => Some(DEFAULT_QUANTITY),
            Some(q) if q > 0 => match u32::try_from(q) {
                Ok(q) => Some(q),
                Err(_) => {
                    errors.push("quantity: Quantity is too large".into());
                    None
                }
            },
            Some(_) => {
                errors.push("quantity: Quantity must be greater than 0".into());
                None
            }
        };

        match (action, strike, expiry, premium, quantity) {
            (Some(action), Some(strike), Some(expiry), Some(premium), Some(quantity))
                if errors.is_empty() =>
            {
                Ok(WebhookSignal {
                    action,
                    symbol: self.symbol.to_uppercase(),
                    strike,
                    expiry,
                    premium,
                    quantity,
                })
            }
            _ => Err(CoreError::Validation(errors.join("; "))),
        }
    }
}

impl WebhookSignal {
    /// One-line summary used in logs, e.g.
    /// `Selling PUT for AAPL - Strike: $150.00, Expiry: 2024-03-15, Premium: $3.25`.
    pub fn describe(&self) -> String {
        format!(
            "Selling {} for {} - Strike: ${:.2}, Expiry: {}, Premium: ${:.2}",
            self.action.option_type().as_str().to_uppercase(),
            self.symbol,
            self.strike,
            self.expiry.format(EXPIRY_FORMAT),
            self.premium,
        )
    }
}

impl From<&WebhookSignal> for WebhookPayload {
    fn from(signal: &WebhookSignal) -> Self {
        Self {
            action: signal.action.as_str().to_string(),
            symbol: signal.symbol.clone(),
            strike: signal.strike,
            expiry: signal.expiry.format(EXPIRY_FORMAT).to_string(),
            premium: signal.premium,
            quantity: Some(i64::from(signal.quantity)),
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Round a price to two decimal places.
///
/// Goes through the decimal formatter, which rounds the exact binary value
/// half to even, so `2.675` (stored just below the tie) becomes `2.67`.
pub fn round_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Non-finite values (`NaN`, either infinity) fail the `> 0` check.
fn check_price(value: f64, max: f64, label: &str) -> Result<f64, String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{label} must be greater than 0"));
    }
    if value > max {
        return Err(format!("{label} seems unreasonably high"));
    }
    Ok(round_cents(value))
}

fn check_expiry(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(raw, EXPIRY_FORMAT)
        .map_err(|_| "Expiry date must be in YYYY-MM-DD format".to_string())?;
    if date <= today {
        return Err("Expiry date must be in the future".into());
    }
    Ok(date)
}
