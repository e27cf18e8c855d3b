//! Relay configuration.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the shared bearer secret.
pub const SECRET_TOKEN_VAR: &str = "SECRET_TOKEN";

/// Configuration for the webhook relay. Loaded once at startup and shared read-only.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Shared secret callers present as `Authorization: Bearer <token>`.
    /// `None` keeps the server up but fails every request with a configuration error.
    #[serde(skip)]
    pub secret_token: Option<String>,

    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Client-side timeout for the outbound webhook call.
    #[serde(default = "defaults::timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    /// Load from `webhook-relay.toml` (optional) and `RELAY_*` env vars, then
    /// pick up `SECRET_TOKEN` from the process environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut config: Config = ::config::Config::builder()
            .add_source(::config::File::with_name("webhook-relay").required(false))
            .add_source(::config::Environment::with_prefix("RELAY").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.secret_token = std::env::var(SECRET_TOKEN_VAR).ok();
        Ok(config)
    }

    pub fn with_secret_token(mut self, token: impl Into<String>) -> Self {
        self.secret_token = Some(token.into());
        self
    }

    /// The exact `authorization` header value a caller must send.
    pub fn expected_authorization(&self) -> Option<String> {
        self.secret_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_token: None,
            bind_address: defaults::bind_address(),
            timeout_secs: defaults::timeout_secs(),
        }
    }
}

// Keeps the secret out of startup logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "secret_token",
                &self.secret_token.as_ref().map(|_| "<redacted>"),
            )
            .field("bind_address", &self.bind_address)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

mod defaults {
    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn timeout_secs() -> u64 {
        30
    }
}
