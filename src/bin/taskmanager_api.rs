//! HTTP API server for the task service.
//!
//! Configuration comes from the environment (`SERVER_HOST`, `SERVER_PORT`,
//! `DATABASE_URL`, `LOG_LEVEL`, `JWT_SECRET`). The server opens the task
//! store, creates the schema if needed, and serves until interrupted, letting
//! in-flight requests finish before exiting.

use anyhow::Context;
use mockable::DefaultClock;
use std::sync::Arc;
use taskmanager::{
    config::Config,
    http,
    task::{adapters::sqlite::SqliteTaskRepository, services::TaskService},
    telemetry,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = telemetry::init_from_config(Config::load())?;

    serve(&config).await.inspect_err(|err| {
        let detail = format!("{err:#}");
        error!(error = %detail, "API server failed");
    })
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    info!(database = %config.database_url, "starting API server");
    let repository = SqliteTaskRepository::open(&config.database_url)
        .await
        .context("failed to open task store")?;
    let tasks = Arc::new(TaskService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "server listening");

    axum::serve(listener, http::router(tasks))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested, draining requests"),
        Err(err) => error!(error = %err, "failed to listen for interrupt, shutting down"),
    }
}
