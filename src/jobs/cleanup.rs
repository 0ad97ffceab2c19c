//! Cleanup of old completed tasks.

use super::Job;
use async_trait::async_trait;
use tracing::info;

/// Placeholder for archiving old completed tasks.
///
/// Runs on the weekly schedule and only records that it ran; no task is
/// modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupOldTasksJob;

impl CleanupOldTasksJob {
    /// Creates the job.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Job for CleanupOldTasksJob {
    fn name(&self) -> &'static str {
        "cleanup_old_tasks"
    }

    async fn run(&self) {
        info!(job = self.name(), "running cleanup job for old tasks");
        info!(job = self.name(), "cleanup job completed");
    }
}
