//! Alpaca brokerage integration.
//!
//! Only the account endpoint is called over the network; option orders are
//! simulated and logged (see [`client::AlpacaClient::place_option_order`]).

pub mod client;
pub mod config;
pub mod order;

pub use client::{Account, AlpacaClient, AlpacaError};
pub use config::AlpacaConfig;
pub use order::{OrderDetails, OrderOutcome};
