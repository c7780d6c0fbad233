//! REST client for the Alpaca trading API.

use std::time::Duration;

use serde::Deserialize;
use wheelbot_core::signal::WebhookSignal;

use crate::config::AlpacaConfig;
use crate::order::{OrderDetails, OrderOutcome, STATUS_SIMULATED};

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Errors from the Alpaca REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum AlpacaError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Alpaca returned a non-2xx status code.
    #[error("Alpaca API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Subset of the `GET /v2/account` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub buying_power: Option<String>,
}

/// HTTP client for one Alpaca account.
pub struct AlpacaClient {
    client: reqwest::Client,
    config: AlpacaConfig,
}

impl AlpacaClient {
    /// Create a client without contacting the API.
    pub fn new(config: AlpacaConfig) -> Result<Self, AlpacaError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Create a client and verify the credentials by fetching the account.
    pub async fn connect(config: AlpacaConfig) -> Result<Self, AlpacaError> {
        let client = Self::new(config)?;
        let account = client.get_account().await?;
        tracing::info!(
            account_status = %account.status,
            base_url = %client.config.base_url,
            "Connected to Alpaca paper trading",
        );
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the trading account (`GET /v2/account`).
    pub async fn get_account(&self) -> Result<Account, AlpacaError> {
        let response = self
            .client
            .get(format!("{}/v2/account", self.config.base_url))
            .header(KEY_ID_HEADER, &self.config.key_id)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Record an option order for the signal without submitting it.
    ///
    /// Paper accounts differ in options support, so the order is logged and
    /// reported back with status `simulated`.
    pub fn place_option_order(&self, signal: &WebhookSignal) -> OrderOutcome {
        let order_details = OrderDetails::for_signal(signal);

        tracing::info!(
            client_order_id = %order_details.client_order_id,
            symbol = %order_details.symbol,
            option_type = %order_details.option_type,
            strike = order_details.strike,
            expiry = %order_details.expiry,
            premium = order_details.premium,
            quantity = order_details.quantity,
            "Would place options order",
        );

        OrderOutcome {
            status: STATUS_SIMULATED.into(),
            order_details,
            message: "Order logged for paper trading simulation".into(),
        }
    }

    /// Deserialize a successful response or turn the status into an error.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AlpacaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlpacaError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use wheelbot_core::signal::{Action, OptionType};

    use super::*;

    fn config(base_url: String) -> AlpacaConfig {
        AlpacaConfig {
            key_id: "key".into(),
            secret_key: "secret".into(),
            base_url,
        }
    }

    #[tokio::test]
    async fn connect_sends_credentials_and_reads_account() {
        let server = MockServer::start_async().await;
        let account_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/account")
                    .header("APCA-API-KEY-ID", "key")
                    .header("APCA-API-SECRET-KEY", "secret");
                then.status(200).json_body(serde_json::json!({
                    "id": "acc-1",
                    "status": "ACTIVE",
                    "currency": "USD",
                    "buying_power": "100000"
                }));
            })
            .await;

        let client = AlpacaClient::connect(config(server.base_url())).await.unwrap();
        account_mock.assert_async().await;

        let account = client.get_account().await.unwrap();
        assert_eq!(account.status, "ACTIVE");
        assert_eq!(account.currency.as_deref(), Some("USD"));
    }

    #[tokio::test]
    async fn rejected_credentials_are_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/account");
                then.status(403).body("{\"message\":\"forbidden\"}");
            })
            .await;

        let err = AlpacaClient::connect(config(server.base_url()))
            .await
            .err()
            .expect("connect should fail");
        match err {
            AlpacaError::Api { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("forbidden"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        // Port 9 (discard) is not expected to accept HTTP.
        let client = AlpacaClient::new(config("http://127.0.0.1:9".into())).unwrap();
        let err = client.get_account().await.unwrap_err();
        assert!(matches!(err, AlpacaError::Request(_)));
    }

    #[test]
    fn place_option_order_is_simulated() {
        let client = AlpacaClient::new(config("http://127.0.0.1:1".into())).unwrap();
        let signal = WebhookSignal {
            action: Action::SellPut,
            symbol: "AAPL".into(),
            strike: 150.0,
            expiry: NaiveDate::from_ymd_opt(2030, 3, 15).unwrap(),
            premium: 3.25,
            quantity: 1,
        };

        let outcome = client.place_option_order(&signal);
        assert_eq!(outcome.status, "simulated");
        assert_eq!(outcome.message, "Order logged for paper trading simulation");
        assert_eq!(outcome.order_details.option_type, OptionType::Put);
        assert_eq!(outcome.order_details.symbol, "AAPL");
    }
}
