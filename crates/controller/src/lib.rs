//! `wheelbot-controller` library crate.
//!
//! Keeps the wheel position in a JSON state file, recommends the next
//! trade, and posts approved trades to the webhook server. The binary
//! entrypoint lives in `main.rs`.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod recommend;
pub mod sender;
pub mod state;
