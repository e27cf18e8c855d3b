//! # Webhook Relay
//!
//! A thin authenticated relay. Checks `Authorization: Bearer <SECRET_TOKEN>`,
//! reads `webhook_url` and `content` from the JSON body, and POSTs
//! `{"content": ..}` to that URL, relaying the answer back.
//!
//! ## Quick Start
//! ```bash
//! SECRET_TOKEN=changeme cargo run --bin webhook-relay
//! ```
//!
//! ## Endpoints
//! - `POST /` or `POST /relay` - Relay a request (plain HTTP)
//! - `POST /invoke` - Relay a function-platform event, answer `{statusCode, body}`
//! - `GET /health` - Liveness and configuration status

pub mod config;
mod error;
pub mod forward;
mod handlers;
mod middleware;
pub mod relay;
mod response;
mod router;
mod state;
pub mod types;

pub use config::Config;
pub use error::RelayError;
pub use forward::Forwarder;
pub use router::create as create_router;
pub use state::AppState;
pub use types::{ForwardPayload, InboundRequest, OutboundResponse};
