//! HTTP surface of the task service.
//!
//! [`router`] builds an axum [`Router`] exposing:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/health` | 200 |
//! | GET | `/api/tasks` | 200, all tasks |
//! | POST | `/api/tasks` | 201, created task |
//! | GET | `/api/tasks/{id}` | 200, task |
//! | PUT | `/api/tasks/{id}` | 200, updated task |
//! | DELETE | `/api/tasks/{id}` | 204 |
//! | PUT | `/api/tasks/{id}/complete` | 200, completed task |
//!
//! The collection routes also answer with a trailing slash. Failures are
//! rendered by [`ApiError`].

pub mod error;
mod handlers;
mod health;
mod middleware;

pub use error::ApiError;
pub use middleware::REQUEST_ID_HEADER;

use crate::task::{ports::TaskRepository, services::TaskService};
use axum::{
    Router,
    routing::{get, put},
};
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
};

/// Longest time a handler may run before the request is abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared state handed to every handler.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task operations backing the API.
    pub tasks: Arc<TaskService<R, C>>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

/// Builds the API router with the default request timeout.
#[must_use]
pub fn router<R, C>(tasks: Arc<TaskService<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    router_with_timeout(tasks, REQUEST_TIMEOUT)
}

/// Builds the API router, abandoning requests that run longer than `timeout`.
#[must_use]
pub fn router_with_timeout<R, C>(tasks: Arc<TaskService<R, C>>, timeout: Duration) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let collection = get(handlers::list::<R, C>).post(handlers::create::<R, C>);

    // Layers wrap outward: the request id is set first and the timeout runs
    // closest to the handler.
    Router::new()
        .route("/health", get(health::check))
        .route("/api/tasks", collection.clone())
        .route("/api/tasks/", collection)
        .route(
            "/api/tasks/{id}",
            get(handlers::show::<R, C>)
                .put(handlers::update::<R, C>)
                .delete(handlers::remove::<R, C>),
        )
        .route("/api/tasks/{id}/complete", put(handlers::complete::<R, C>))
        .with_state(AppState { tasks })
        .layer(axum::middleware::from_fn_with_state(
            timeout,
            middleware::enforce_timeout,
        ))
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
