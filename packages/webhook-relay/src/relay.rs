//! The relay handler: authenticate, parse, forward, respond.

use crate::config::Config;
use crate::error::RelayError;
use crate::forward::Forwarder;
use crate::types::{ForwardPayload, InboundRequest, OutboundResponse};
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

/// Turn one inbound request into exactly one response.
///
/// Every failure short-circuits into its mapped status/body pair; nothing is
/// retried and no error escapes to the caller.
pub async fn handle(
    config: &Config,
    forwarder: &Forwarder,
    request: &InboundRequest,
) -> OutboundResponse {
    match run(config, forwarder, request).await {
        Ok(body) => {
            info!(status = 200, "Webhook delivered");
            OutboundResponse::new(200, body)
        }
        Err(e) => {
            match &e {
                RelayError::ConfigMissing => error!("SECRET_TOKEN not set, rejecting request"),
                RelayError::Internal(msg) => error!(error = %msg, "Relay failed"),
                _ => warn!(status = e.status_code(), error = %e, "Relay rejected"),
            }
            e.into_outbound()
        }
    }
}

async fn run(
    config: &Config,
    forwarder: &Forwarder,
    request: &InboundRequest,
) -> Result<String, RelayError> {
    authenticate(config, request)?;

    let payload = ForwardPayload::from_body(request.body_text())?;
    info!(host = %target_host(&payload.webhook_url), "Forwarding message");

    forwarder.forward(&payload).await
}

/// Require `authorization` to equal `Bearer <SECRET_TOKEN>` exactly.
/// A missing header compares as empty.
pub fn authenticate(config: &Config, request: &InboundRequest) -> Result<(), RelayError> {
    let expected = config
        .expected_authorization()
        .ok_or(RelayError::ConfigMissing)?;
    let provided = request.header("authorization").unwrap_or_default();

    if provided.len() == expected.len() && provided.as_bytes().ct_eq(expected.as_bytes()).into() {
        Ok(())
    } else {
        Err(RelayError::AuthFailed)
    }
}

/// Host part of the target, for logs. Paths often embed webhook secrets.
fn target_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid>".to_string())
}
