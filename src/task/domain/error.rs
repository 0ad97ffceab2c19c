//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The due date is not an ISO calendar date.
    #[error("invalid due date format '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),
}
