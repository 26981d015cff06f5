//! Sviss ToDo HTTP server.
//!
//! Serves `/api/todos` with Redis persistence when `REDIS_URL` is set and
//! reachable, and in ephemeral mode otherwise.

use anyhow::Context;
use std::sync::Arc;
use sviss_todo_core::environment::UuidIdGenerator;
use sviss_todo_store::RedisBackend;
use sviss_todo_web::{build_router, config::DEFAULT_LOG_FILTER, AppState, Config};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!("Starting Sviss ToDo server");

    let config = Config::from_env().context("Invalid configuration")?;
    info!(?config, "Configuration loaded");

    let backend = match RedisBackend::new(config.redis.url.as_deref()) {
        Ok(backend) => backend,
        Err(error) => {
            warn!(error = %error, "Ignoring Redis configuration, running without persistence");
            RedisBackend::unconfigured()
        }
    };

    let state = AppState::new(Arc::new(backend), Arc::new(UuidIdGenerator));
    let app = build_router(state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(error = %error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
