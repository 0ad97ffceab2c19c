//! Background job runner for the task service.
//!
//! Shares configuration and the task store with the API server and runs the
//! reminder job daily at 09:00 UTC and the cleanup job weekly on Sunday at
//! 00:00 UTC until interrupted.

use anyhow::Context;
use mockable::DefaultClock;
use std::sync::Arc;
use taskmanager::{
    config::Config,
    scheduler::task_scheduler,
    task::{adapters::sqlite::SqliteTaskRepository, services::TaskService},
    telemetry,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = telemetry::init_from_config(Config::load())?;

    run(&config).await.inspect_err(|err| {
        let detail = format!("{err:#}");
        error!(error = %detail, "cron process failed");
    })
}

async fn run(config: &Config) -> anyhow::Result<()> {
    info!(database = %config.database_url, "starting cron jobs");
    let repository = SqliteTaskRepository::open(&config.database_url)
        .await
        .context("failed to open task store")?;
    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(TaskService::new(Arc::new(repository), Arc::clone(&clock)));

    let mut scheduler =
        task_scheduler(tasks, clock).context("failed to build job schedule")?;
    for (job, next_run) in scheduler.upcoming() {
        info!(job, %next_run, "job scheduled");
    }

    scheduler.run_until(shutdown_signal()).await;
    info!("cron jobs stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => error!(error = %err, "failed to listen for interrupt, shutting down"),
    }
}
