//! Scheduler loop.

use super::Schedule;
use crate::jobs::Job;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::{future::Future, pin::pin, sync::Arc, time::Duration};
use tracing::{debug, info};

/// Longest single sleep, so wall-clock jumps are noticed.
const MAX_SLEEP: Duration = Duration::from_secs(60);

struct ScheduledJob {
    schedule: Schedule,
    job: Arc<dyn Job>,
    next_run: DateTime<Utc>,
}

/// Runs registered jobs when their schedules come due.
///
/// Jobs run one at a time in registration order. A run that overlaps a
/// later firing time delays it; missed firings collapse into one run.
pub struct Scheduler<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    entries: Vec<ScheduledJob>,
}

impl<C> Scheduler<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a scheduler with no jobs.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    /// Registers `job` to run on `schedule`, first firing after now.
    #[must_use]
    pub fn every(mut self, schedule: Schedule, job: Arc<dyn Job>) -> Self {
        let next_run = schedule.next_after(self.clock.utc());
        self.entries.push(ScheduledJob {
            schedule,
            job,
            next_run,
        });
        self
    }

    /// Returns each job name with its next firing time, in registration order.
    #[must_use]
    pub fn upcoming(&self) -> Vec<(&'static str, DateTime<Utc>)> {
        self.entries
            .iter()
            .map(|entry| (entry.job.name(), entry.next_run))
            .collect()
    }

    /// Returns the earliest pending firing time.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|entry| entry.next_run).min()
    }

    /// Runs every job whose firing time has passed and returns how many ran.
    pub async fn run_due(&mut self) -> usize {
        let now = self.clock.utc();
        let mut ran = 0;
        for entry in &mut self.entries {
            if entry.next_run > now {
                continue;
            }
            info!(job = entry.job.name(), schedule = %entry.schedule, "running scheduled job");
            entry.job.run().await;
            entry.next_run = entry.schedule.next_after(now);
            debug!(job = entry.job.name(), next_run = %entry.next_run, "job rescheduled");
            ran += 1;
        }
        ran
    }

    /// Runs jobs as they come due until `shutdown` resolves.
    ///
    /// A job that is already running finishes before shutdown is observed.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut stop = pin!(shutdown);
        loop {
            let delay = self.next_wakeup().map_or(MAX_SLEEP, |wakeup| {
                (wakeup - self.clock.utc())
                    .to_std()
                    .unwrap_or(Duration::ZERO)
                    .min(MAX_SLEEP)
            });
            tokio::select! {
                () = &mut stop => {
                    info!("scheduler stopping");
                    return;
                }
                () = tokio::time::sleep(delay) => {
                    self.run_due().await;
                }
            }
        }
    }
}
