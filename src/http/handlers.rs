//! Task resource handlers.

use super::{AppState, error::ApiError};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use mockable::Clock;
use serde::{Deserialize, Deserializer};

/// Body of `POST /api/tasks`.
///
/// A missing title is treated as empty so it fails validation rather than
/// body parsing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct CreateTaskBody {
    title: String,
    description: String,
    due_date: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`.
///
/// Omitted fields and empty strings stay unchanged. Only an explicit `null`
/// `due_date` clears the due date.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "present")]
    due_date: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(body.title).with_description(body.description);
        if let Some(due_date) = body.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        match body.due_date {
            Some(Some(due_date)) => request.with_due_date(due_date),
            Some(None) => request.clear_due_date(),
            None => request,
        }
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse::<i64>()
        .map(TaskId::new)
        .map_err(|_| ApiError::InvalidTaskId)
}

pub(super) async fn list<R, C>(
    State(state): State<AppState<R, C>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = state
        .tasks
        .get_all()
        .await
        .map_err(ApiError::service("Failed to get tasks"))?;
    Ok(Json(tasks))
}

pub(super) async fn create<R, C>(
    State(state): State<AppState<R, C>>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(payload) = body?;
    let task = state
        .tasks
        .create(payload.into())
        .await
        .map_err(ApiError::service("Failed to create task"))?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub(super) async fn show<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let task = state
        .tasks
        .get_by_id(id)
        .await
        .map_err(ApiError::service("Failed to get task"))?;
    Ok(Json(task))
}

pub(super) async fn update<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let Json(payload) = body?;
    let task = state
        .tasks
        .update(id, payload.into())
        .await
        .map_err(ApiError::service("Failed to update task"))?;
    Ok(Json(task))
}

pub(super) async fn remove<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    state
        .tasks
        .delete(id)
        .await
        .map_err(ApiError::service("Failed to delete task"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn complete<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let task = state
        .tasks
        .complete(id)
        .await
        .map_err(ApiError::service("Failed to complete task"))?;
    Ok(Json(task))
}
