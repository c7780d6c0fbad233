//! Domain types shared by the webhook server and the wheel controller.
//!
//! This crate has no internal deps and performs no I/O, so both the API
//! layer and the CLI can depend on it.

pub mod calendar;
pub mod error;
pub mod signal;
pub mod wheel;
