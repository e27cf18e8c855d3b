//! Per-invocation data: what comes in, what gets forwarded, what goes back.

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body used when the request carries none.
const EMPTY_OBJECT: &str = "{}";

/// One inbound invocation as handed over by the host platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundRequest {
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundRequest {
    pub fn new(headers: HashMap<String, String>, body: Option<String>) -> Self {
        Self { headers, body }
    }

    /// Header lookup. An exact key wins; otherwise the name is matched
    /// ignoring ASCII case, taking the smallest such key so the result does
    /// not depend on map iteration order.
    pub fn header(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.headers.get(name) {
            return Some(value.as_str());
        }
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.as_str())
    }

    /// Raw body text, with an absent body read as `{}`. An empty string is
    /// kept as-is and fails JSON parsing.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or(EMPTY_OBJECT)
    }
}

/// Destination and message extracted from the inbound body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardPayload {
    pub webhook_url: String,
    pub content: String,
}

impl ForwardPayload {
    /// Parse the inbound body and pull out `webhook_url` and `content`.
    pub fn from_body(body: &str) -> Result<Self, RelayError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| RelayError::Parse(e.to_string()))?;

        Ok(Self {
            webhook_url: required_str(&value, "webhook_url")?,
            content: required_str(&value, "content")?,
        })
    }

    /// JSON document POSTed to the webhook.
    pub fn outbound_body(&self) -> Value {
        serde_json::json!({ "content": self.content })
    }
}

fn required_str(value: &Value, field: &'static str) -> Result<String, RelayError> {
    match value.get(field) {
        None => Err(RelayError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RelayError::Parse(format!("field `{field}` must be a string"))),
    }
}

/// The single result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}
