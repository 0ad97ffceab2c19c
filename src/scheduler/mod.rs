//! Periodic job scheduling.
//!
//! A [`Schedule`] names a wall-clock firing rule (daily or weekly, in UTC)
//! and the [`Scheduler`] runs [`crate::jobs::Job`]s as their rules come due.
//! [`task_scheduler`] wires the default task jobs.

mod runner;
mod schedule;

pub use runner::Scheduler;
pub use schedule::{Schedule, SchedulerError};

use crate::jobs::{CleanupOldTasksJob, TaskReminderJob};
use crate::task::{ports::TaskRepository, services::TaskService};
use chrono::Weekday;
use mockable::Clock;
use std::sync::Arc;

/// Builds the scheduler used by the cron process.
///
/// The reminder runs daily at 09:00 UTC and the cleanup weekly on Sunday at
/// 00:00 UTC.
///
/// # Errors
///
/// Returns [`SchedulerError`] if a built-in schedule is invalid.
pub fn task_scheduler<R, C>(
    tasks: Arc<TaskService<R, C>>,
    clock: Arc<C>,
) -> Result<Scheduler<C>, SchedulerError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Scheduler::new(clock)
        .every(
            Schedule::daily(9, 0)?,
            Arc::new(TaskReminderJob::new(tasks)),
        )
        .every(
            Schedule::weekly(Weekday::Sun, 0, 0)?,
            Arc::new(CleanupOldTasksJob::new()),
        ))
}
