//! Application state shared across handlers.

use crate::config::Config;
use crate::error::RelayError;
use crate::forward::Forwarder;
use std::sync::atomic::AtomicU64;
use std::time::Instant;
use tracing::{info, warn};

/// Shared application state. Read-only apart from the request counter.
pub struct AppState {
    pub config: Config,
    pub forwarder: Forwarder,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: Config) -> Result<Self, RelayError> {
        let forwarder = Forwarder::new(config.timeout())?;

        if config.secret_token.is_some() {
            info!(timeout_secs = config.timeout_secs, "Bearer auth enabled");
        } else {
            warn!("SECRET_TOKEN not set, every request will fail with a configuration error");
        }

        Ok(Self {
            config,
            forwarder,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        })
    }
}
