//! Deterministic clock, repository double, and log capture for unit tests.

use crate::task::{
    domain::{NewTask, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock that returns a controlled instant and optionally advances on read.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl TestClock {
    /// Clock frozen at `at` until moved explicitly.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::stepping(at, TimeDelta::zero())
    }

    /// Clock that moves forward by `step` after every read.
    pub fn stepping(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            now: Mutex::new(start),
            step,
        }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = at;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        Local.from_utc_datetime(&self.utc().naive_utc())
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *now;
        *now += self.step;
        current
    }
}

/// Builds a UTC instant from calendar parts.
///
/// # Panics
///
/// Panics when the parts do not form a valid instant.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test instant")
}

/// In-memory sink for formatted tracing output.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Installs a thread-local subscriber writing into this sink.
    ///
    /// Events are captured until the returned guard is dropped. Use with a
    /// current-thread runtime so spawned work stays on the capturing thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Returns the captured output lines.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Returns the captured lines containing `needle`.
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

mock! {
    /// Scriptable repository for failure paths.
    pub Repository {}

    #[async_trait]
    impl TaskRepository for Repository {
        async fn initialize(&self) -> TaskRepositoryResult<()>;
        async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task>;
        async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
    }
}
