//! Posts approved signals to the webhook server.

use std::time::Duration;

use serde_json::json;
use wheelbot_core::signal::{WebhookPayload, WebhookSignal};

/// HTTP request timeout for a single delivery.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status reported when the request never got a response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Outcome of one delivery: the HTTP status and the decoded body.
///
/// Transport failures are reported as status 500 with `{"error": ...}`,
/// so callers handle a single shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct WebhookSender {
    client: reqwest::Client,
    url: String,
}

impl WebhookSender {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the signal as JSON.
    pub async fn send(&self, signal: &WebhookSignal) -> Delivery {
        let payload = WebhookPayload::from(signal);
        tracing::debug!(url = %self.url, action = %signal.action, "Posting signal");

        match self.try_send(&payload).await {
            Ok(delivery) => delivery,
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Webhook request failed");
                Delivery {
                    status: TRANSPORT_FAILURE_STATUS,
                    body: json!({ "error": e.to_string() }),
                }
            }
        }
    }

    async fn try_send(&self, payload: &WebhookPayload) -> Result<Delivery, reqwest::Error> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
        Ok(Delivery { status, body })
    }
}
