use std::sync::Arc;

use wheelbot_broker::AlpacaClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Alpaca client, `None` when credentials are missing or the account
    /// check failed at startup.
    pub broker: Option<Arc<AlpacaClient>>,
}

impl AppState {
    pub fn broker_connected(&self) -> bool {
        self.broker.is_some()
    }
}
