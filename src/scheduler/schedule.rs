//! Wall-clock firing rules evaluated in UTC.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeDelta, Utc, Weekday};
use std::fmt;
use thiserror::Error;

/// Errors returned while building schedules.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// Hour or minute is out of range.
    #[error("invalid schedule time {hour:02}:{minute:02}, expected 00:00 to 23:59")]
    InvalidTime {
        /// Requested hour.
        hour: u32,
        /// Requested minute.
        minute: u32,
    },
}

/// When a job fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Every day at a fixed UTC time.
    Daily {
        /// Time of day.
        at: NaiveTime,
    },
    /// Once a week on a fixed weekday and UTC time.
    Weekly {
        /// Day of the week.
        weekday: Weekday,
        /// Time of day.
        at: NaiveTime,
    },
}

impl Schedule {
    /// Fires every day at `hour:minute` UTC.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidTime`] when the time is out of range.
    pub fn daily(hour: u32, minute: u32) -> Result<Self, SchedulerError> {
        Ok(Self::Daily {
            at: time_of_day(hour, minute)?,
        })
    }

    /// Fires every `weekday` at `hour:minute` UTC.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidTime`] when the time is out of range.
    pub fn weekly(weekday: Weekday, hour: u32, minute: u32) -> Result<Self, SchedulerError> {
        Ok(Self::Weekly {
            weekday,
            at: time_of_day(hour, minute)?,
        })
    }

    /// Returns the first firing time strictly after `instant`.
    #[must_use]
    pub fn next_after(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let (at, weekday) = match *self {
            Self::Daily { at } => (at, None),
            Self::Weekly { weekday, at } => (at, Some(weekday)),
        };
        let today = instant.date_naive();

        (0..=7)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .filter(|day| weekday.is_none_or(|wanted| day.weekday() == wanted))
            .map(|day| day.and_time(at).and_utc())
            .find(|candidate| *candidate > instant)
            .unwrap_or_else(|| instant + TimeDelta::weeks(1))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { at } => write!(f, "daily at {} UTC", at.format("%H:%M")),
            Self::Weekly { weekday, at } => {
                write!(f, "weekly on {weekday} at {} UTC", at.format("%H:%M"))
            }
        }
    }
}

fn time_of_day(hour: u32, minute: u32) -> Result<NaiveTime, SchedulerError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(SchedulerError::InvalidTime { hour, minute })
}
