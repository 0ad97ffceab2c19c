//! Due-date reminders.

use super::Job;
use crate::task::{
    domain::Task,
    ports::TaskRepository,
    services::{TaskService, TaskServiceResult},
};
use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

/// How far ahead of now a due date triggers a reminder.
pub const REMINDER_WINDOW: TimeDelta = TimeDelta::hours(24);

/// Logs a reminder for every open task due within [`REMINDER_WINDOW`].
///
/// Overdue tasks keep being reminded until completed. Reminders are log
/// lines only; no notification is sent.
pub struct TaskReminderJob<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<TaskService<R, C>>,
}

impl<R, C> TaskReminderJob<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the job over a shared task service.
    #[must_use]
    pub const fn new(tasks: Arc<TaskService<R, C>>) -> Self {
        Self { tasks }
    }

    /// Emits one reminder per due task and returns the reminded tasks.
    ///
    /// # Errors
    ///
    /// Returns the service error when tasks cannot be loaded; nothing is
    /// logged for any task in that case.
    pub async fn remind(&self) -> TaskServiceResult<Vec<Task>> {
        let due = self.tasks.pending_due_within(REMINDER_WINDOW).await?;
        for task in &due {
            if let Some(due_date) = task.due_date() {
                info!(
                    task_id = %task.id(),
                    title = %task.title(),
                    %due_date,
                    "task is due soon"
                );
            }
        }
        Ok(due)
    }
}

#[async_trait]
impl<R, C> Job for TaskReminderJob<R, C>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "task_reminder"
    }

    async fn run(&self) {
        info!(job = self.name(), "running task reminder job");
        if let Err(err) = self.remind().await {
            error!(job = self.name(), error = %err, "failed to load tasks for reminder");
        }
    }
}
