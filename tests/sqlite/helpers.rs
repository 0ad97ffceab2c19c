//! Shared fixtures for `SQLite` repository tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use taskmanager::task::{
    adapters::sqlite::{DatabaseUrl, SqliteTaskRepository},
    domain::{DueDate, NewTask, TaskTitle},
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.0.with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a UTC instant with a microsecond component.
pub fn instant(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    micros: i64,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test instant")
        + TimeDelta::microseconds(micros)
}

/// Opens a repository over a fresh private in-memory database.
pub async fn open_in_memory() -> SqliteTaskRepository {
    SqliteTaskRepository::open(&DatabaseUrl::in_memory())
        .await
        .expect("in-memory store should open")
}

/// Builds an unsaved task stamped at `at`.
pub fn new_task(title: &str, due_date: Option<&str>, at: DateTime<Utc>) -> NewTask {
    NewTask::new(
        TaskTitle::new(title).expect("valid title"),
        format!("{title} details"),
        due_date.map(|text| DueDate::parse(text).expect("valid due date")),
        &FixedClock(at),
    )
}
