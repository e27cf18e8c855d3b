//! Webhook relay binary.

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webhook_relay::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting webhook relay");

    let config = Config::load()?;
    info!(config = ?config, "Configuration loaded");

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    info!(address = %bind_address, "Listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay shut down gracefully");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    res = tokio::signal::ctrl_c() => log_ctrl_c(res),
                    _ = sigterm.recv() => info!(signal = "SIGTERM", "Draining in-flight relays"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "SIGTERM handler unavailable, relying on Ctrl+C"),
        }
    }

    log_ctrl_c(tokio::signal::ctrl_c().await);
}

fn log_ctrl_c(res: std::io::Result<()>) {
    match res {
        Ok(()) => info!(signal = "SIGINT", "Draining in-flight relays"),
        Err(e) => warn!(error = %e, "Ctrl+C handler failed, shutting down"),
    }
}
