//! Background jobs run by the [`crate::scheduler`].
//!
//! A job logs its own failures and returns; the scheduler never retries a
//! job before its next scheduled firing.

mod cleanup;
mod reminder;

pub use cleanup::CleanupOldTasksJob;
pub use reminder::{REMINDER_WINDOW, TaskReminderJob};

use async_trait::async_trait;

/// Unit of scheduled background work.
#[async_trait]
pub trait Job: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the job to completion.
    async fn run(&self);
}
