//! Outbound webhook client.

use crate::error::RelayError;
use crate::types::ForwardPayload;
use hyper::ext::ReasonPhrase;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Sent on every outbound call. Some webhook providers reject requests carrying
/// HTTP-library default agents, so this must stay a plain curl string.
pub const USER_AGENT: &str = "curl/7.64.1";

/// HTTP client for delivering one message to one webhook.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(timeout: Duration) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// POST `{"content": ..}` to the payload's webhook and return the response body.
    ///
    /// 4xx/5xx answers become [`RelayError::UpstreamHttp`]; transport failures,
    /// timeouts and non-UTF-8 bodies become [`RelayError::Internal`].
    pub async fn forward(&self, payload: &ForwardPayload) -> Result<String, RelayError> {
        let response = self
            .client
            .post(&payload.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload.outbound_body())
            .send()
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(RelayError::UpstreamHttp {
                status: status.as_u16(),
                reason: reason_phrase(&response),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        String::from_utf8(bytes.to_vec()).map_err(|e| RelayError::Internal(e.to_string()))
    }
}

/// Reason phrase as sent by the webhook. hyper only records it when it differs
/// from the canonical one, so fall back to that, then to `Unknown`.
fn reason_phrase(response: &reqwest::Response) -> String {
    if let Some(phrase) = response
        .extensions()
        .get::<ReasonPhrase>()
        .filter(|p| !p.as_bytes().is_empty())
    {
        return String::from_utf8_lossy(phrase.as_bytes()).into_owned();
    }
    response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string()
}
