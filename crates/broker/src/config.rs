//! Alpaca credentials and endpoint.

/// Paper trading endpoint, used unless `APCA_API_BASE_URL` says otherwise.
pub const PAPER_BASE_URL: &str = "https://paper-api.alpaca.markets";

/// Connection settings for the Alpaca trading API.
#[derive(Clone)]
pub struct AlpacaConfig {
    pub key_id: String,
    pub secret_key: String,
    /// Base URL without trailing slash.
    pub base_url: String,
}

impl std::fmt::Debug for AlpacaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaConfig")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AlpacaConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when either credential is missing or empty, in which
    /// case the service runs without a broker connection.
    ///
    /// | Variable              | Required | Default                             |
    /// |-----------------------|----------|-------------------------------------|
    /// | `APCA_API_KEY_ID`     | yes      | --                                  |
    /// | `APCA_API_SECRET_KEY` | yes      | --                                  |
    /// | `APCA_API_BASE_URL`   | no       | `https://paper-api.alpaca.markets`  |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (Some(key_id), Some(secret_key)) =
            (non_empty("APCA_API_KEY_ID"), non_empty("APCA_API_SECRET_KEY"))
        else {
            tracing::error!("Alpaca API credentials not found in environment variables");
            return None;
        };

        let base_url = non_empty("APCA_API_BASE_URL")
            .unwrap_or_else(|| PAPER_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Some(Self {
            key_id,
            secret_key,
            base_url,
        })
    }
}
