//! Service layer for task creation, update, and completion.

use crate::task::{
    domain::{DueDate, NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    due_date: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the due date as `YYYY-MM-DD` text; empty text means no due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Fields that are never set, or set to empty text, are left unchanged.
/// Only [`UpdateTaskRequest::clear_due_date`] removes a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<Option<String>>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title; empty text leaves it unchanged.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description; empty text leaves it unchanged.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the due date with `YYYY-MM-DD` text; empty text leaves it
    /// unchanged.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let title = self
            .title
            .filter(|text| !text.is_empty())
            .map(TaskTitle::new)
            .transpose()?;
        let due_date = self
            .due_date
            .filter(|text| text.as_deref() != Some(""))
            .map(|text| parse_optional_due_date(text.as_deref()))
            .transpose()?;
        Ok(TaskPatch {
            title,
            description: self.description.filter(|text| !text.is_empty()),
            due_date,
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` when the error was caused by invalid input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns `true` when the requested task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Stateless between calls; all state lives in the repository.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_all(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns pending tasks whose due date falls before `now + window`.
    ///
    /// Overdue tasks are included; completed tasks and tasks without a due
    /// date never are. Order follows [`TaskService::get_all`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn pending_due_within(&self, window: TimeDelta) -> TaskServiceResult<Vec<Task>> {
        let deadline = self.clock.utc() + window;
        let tasks = self.repository.find_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_pending_due_before(deadline))
            .collect())
    }

    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn get_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is empty or the due
    /// date is malformed, and [`TaskServiceError::Repository`] when the store
    /// rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            title: raw_title,
            description,
            due_date: raw_due_date,
        } = request;

        let title = TaskTitle::new(raw_title)?;
        let due_date = parse_optional_due_date(raw_due_date.as_deref())?;
        let task = NewTask::new(title, description, due_date, &*self.clock);
        let created = self.repository.create(&task).await?;
        debug!(task_id = %created.id(), "task created");
        Ok(created)
    }

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist and
    /// [`TaskServiceError::Domain`] when a supplied field is invalid.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self.repository.find_by_id(id).await?;
        let patch = request.into_patch()?;
        task.apply_patch(patch, &*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task; deleting a missing task succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        let removed = self.repository.delete(id).await?;
        if !removed {
            debug!(task_id = %id, "delete requested for missing task");
        }
        Ok(())
    }

    /// Marks a task completed.
    ///
    /// Completing an already completed task re-stamps `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] wrapping
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn complete(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.repository.find_by_id(id).await?;
        task.complete(&*self.clock);
        self.repository.update(&task).await?;
        Ok(task)
    }
}

/// Parses optional due date text, treating empty text as "no due date".
fn parse_optional_due_date(text: Option<&str>) -> Result<Option<DueDate>, TaskDomainError> {
    match text {
        None | Some("") => Ok(None),
        Some(value) => DueDate::parse(value).map(Some),
    }
}
