//! Translation of task failures into HTTP responses.

use crate::task::{
    domain::TaskDomainError,
    ports::TaskRepositoryError,
    services::TaskServiceError,
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors surfaced by the task API.
///
/// Every variant renders as `{"error": "<message>"}`. Storage failures only
/// expose a generic message; their cause goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid task ID")]
    InvalidTaskId,

    /// The request body is not the expected JSON document.
    #[error("Invalid request body")]
    InvalidBody(#[source] JsonRejection),

    /// A supplied field failed validation.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// No task has the requested identifier.
    #[error("Task not found")]
    NotFound,

    /// The store failed while performing the named action.
    #[error("{message}")]
    Internal {
        /// Client-facing summary such as `Failed to create task`.
        message: &'static str,
        /// Underlying service failure.
        #[source]
        source: TaskServiceError,
    },

    /// The handler did not finish within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// The handler panicked.
    #[error("Internal server error")]
    Panicked,
}

impl ApiError {
    /// Returns a mapper that classifies a service error, using `message` for
    /// storage failures.
    #[must_use]
    pub fn service(message: &'static str) -> impl FnOnce(TaskServiceError) -> Self {
        move |err| match err {
            TaskServiceError::Domain(domain) => Self::Validation(domain),
            TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => Self::NotFound,
            source @ TaskServiceError::Repository(TaskRepositoryError::Persistence(_)) => {
                Self::Internal { message, source }
            }
        }
    }

    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTaskId | Self::InvalidBody(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } | Self::Panicked => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal { message, source } => error!(error = %source, "{message}"),
            Self::InvalidBody(rejection) => {
                debug!(reason = %rejection.body_text(), "rejected request body");
            }
            Self::Timeout | Self::Panicked => warn!(error = %self, "request aborted"),
            Self::InvalidTaskId | Self::Validation(_) | Self::NotFound => {
                debug!(error = %self, "request rejected");
            }
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
