//! HTTP request handlers.
//!
//! Each surface converts its transport shape into an [`InboundRequest`], runs
//! [`relay::handle`], and converts the [`OutboundResponse`] back.

use crate::error::RelayError;
use crate::middleware::RequestId;
use crate::relay;
use crate::response::HealthResponse;
use crate::state::AppState;
use crate::types::{InboundRequest, OutboundResponse};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};

/// Plain HTTP front: headers and raw body in, relay status and text body out.
pub async fn relay_http(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let req_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();

    let headers = header_map_to_strings(&headers);
    let body = match String::from_utf8(body.to_vec()) {
        Ok(text) if text.is_empty() => None,
        Ok(text) => Some(text),
        Err(e) => {
            // Auth still decides first; only then is the body's encoding reported.
            let inbound = InboundRequest::new(headers, None);
            let err = match relay::authenticate(&state.config, &inbound) {
                Err(auth_err) => auth_err,
                Ok(()) => RelayError::Parse(format!("request body is not valid UTF-8: {e}")),
            };
            warn!(req_id = %req_id, status = err.status_code(), error = %err, "Relay rejected");
            return err.into_response();
        }
    };

    let inbound = InboundRequest::new(headers, body);
    relay::handle(&state.config, &state.forwarder, &inbound)
        .instrument(info_span!("relay", req_id = %req_id))
        .await
        .into_response()
}

/// Function-platform trigger: `{"headers", "body"}` event in,
/// `{"statusCode", "body"}` document out.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(event): Json<InboundRequest>,
) -> Json<OutboundResponse> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let req_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();

    let response = relay::handle(&state.config, &state.forwarder, &event)
        .instrument(info_span!("invoke", req_id = %req_id))
        .await;
    Json(response)
}

/// Liveness with configuration status.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = if state.config.secret_token.is_some() {
        "ok"
    } else {
        "misconfigured"
    };

    Json(HealthResponse {
        status,
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}

/// Header names come out lowercased; values that are not visible ASCII are dropped.
fn header_map_to_strings(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
