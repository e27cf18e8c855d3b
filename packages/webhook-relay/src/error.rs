//! Error types for the relay.

use crate::types::OutboundResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Everything that can end an invocation early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// `SECRET_TOKEN` is not set.
    ConfigMissing,
    /// `authorization` header absent or not equal to `Bearer <token>`.
    AuthFailed,
    /// Body is not valid JSON, or a field has the wrong type.
    Parse(String),
    /// A required body field is absent.
    MissingField(&'static str),
    /// Webhook answered with a 4xx/5xx status.
    UpstreamHttp { status: u16, reason: String },
    /// Network failure, timeout, undecodable response, bad URL.
    Internal(String),
}

impl RelayError {
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::ConfigMissing | RelayError::Internal(_) => 500,
            RelayError::AuthFailed => 403,
            RelayError::Parse(_) | RelayError::MissingField(_) => 400,
            RelayError::UpstreamHttp { status, .. } => *status,
        }
    }

    /// Body text returned to the caller.
    pub fn response_body(&self) -> String {
        match self {
            RelayError::ConfigMissing => "Server configuration error".to_string(),
            RelayError::AuthFailed => "403 Forbidden".to_string(),
            RelayError::Parse(_) | RelayError::MissingField(_) => format!("Bad Request: {self}"),
            RelayError::UpstreamHttp { reason, .. } => format!("Webhook error: {reason}"),
            RelayError::Internal(msg) => format!("Internal error: {msg}"),
        }
    }

    pub fn into_outbound(self) -> OutboundResponse {
        OutboundResponse::new(self.status_code(), self.response_body())
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::ConfigMissing => write!(f, "SECRET_TOKEN is not configured"),
            RelayError::AuthFailed => write!(f, "authorization mismatch"),
            RelayError::Parse(msg) => write!(f, "{msg}"),
            RelayError::MissingField(field) => write!(f, "missing field `{field}`"),
            RelayError::UpstreamHttp { status, reason } => {
                write!(f, "webhook responded {status} {reason}")
            }
            RelayError::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.into_outbound().into_response()
    }
}

impl IntoResponse for OutboundResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; charset=utf-8",
            )],
            self.body,
        )
            .into_response()
    }
}
