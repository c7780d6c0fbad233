pub mod status;
pub mod webhook;

/// Display name reported by the status and health endpoints.
pub const SERVICE_NAME: &str = "Wheel Strategy Bot";
