//! HTTP API server for the amber-dialer demo chat platform.

mod config;
mod error;
mod routes;
mod state;

use amber_dialer_assistant::{AssistantApi, HttpAssistantClient};
use amber_dialer_directory::{DirectoryStore, RestKvDirectory};
use config::ServerConfig;
use state::{AppState, LinkBuilder};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment; missing credentials die here.
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let api: Arc<dyn AssistantApi> = Arc::new(HttpAssistantClient::new(config.assistant.clone()));
    let directory: Arc<dyn DirectoryStore> =
        Arc::new(RestKvDirectory::new(config.directory.clone()));

    let state = Arc::new(AppState::new(
        api,
        directory,
        config.poll.to_poll_config(),
        LinkBuilder::new(&config.public_base_url, &config.calendar_base_url),
    ));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

/// Resolves when the process receives an interrupt.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install interrupt handler");
    tracing::info!("shutdown signal received");
}
