use anyhow::Context;
use classroom_chatbot::{config::AppConfig, routes::create_router, state::AppState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {err}");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bind_address = config.bind_address;
    let state = Arc::new(AppState::new(config));

    // Drop idle sessions in the background.
    let purger = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purger.config.purge_interval);
        loop {
            ticker.tick().await;
            let removed = purger.sessions.purge_expired().await;
            if removed > 0 {
                debug!(removed, "purged idle sessions");
            }
        }
    });

    let app = create_router(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    info!("Classroom chatbot running at http://{bind_address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
