//! Request correlation middleware.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request correlation ID, extractable from `Request::extensions()`.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    /// Reuse a caller-supplied id when it is printable, else mint `rel-<16 hex>`.
    fn from_request(request: &Request) -> Self {
        let id = request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("rel-{:016x}", rand::random::<u64>()));
        Self(id)
    }
}

/// Tag the request with a [`RequestId`] and echo it on the way out.
pub async fn inject_request_id(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_request(&request);
    let echoed = HeaderValue::from_str(&request_id.0).ok();
    request.extensions_mut().insert(request_id);

    let mut response = next.run(request).await;
    if let Some(value) = echoed {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}
