//! Taskmanager: a small task tracking service.
//!
//! The crate exposes a JSON HTTP API for creating, listing, updating,
//! completing, and deleting tasks, plus a scheduler that runs periodic
//! background jobs (due-date reminders and cleanup) against the same store.
//!
//! # Architecture
//!
//! The task core follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`SQLite`, in-memory)
//!
//! The outer surfaces wrap a shared [`task::services::TaskService`].
//!
//! # Modules
//!
//! - [`task`]: Task model, storage, and lifecycle rules
//! - [`http`]: axum router exposing the task API
//! - [`jobs`]: Background jobs run by the scheduler
//! - [`scheduler`]: Wall-clock schedules and the job runner
//! - [`config`]: Environment-driven process configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod http;
pub mod jobs;
pub mod scheduler;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
