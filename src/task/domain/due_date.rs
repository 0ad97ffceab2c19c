//! Calendar due dates.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input format accepted for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A task due date, held as midnight UTC of the requested day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(DateTime<Utc>);

impl DueDate {
    /// Parses a `YYYY-MM-DD` calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the text is not a
    /// valid calendar date in that format.
    pub fn parse(text: &str) -> Result<Self, TaskDomainError> {
        NaiveDate::parse_from_str(text, DUE_DATE_FORMAT)
            .map(Self::from_date)
            .map_err(|_| TaskDomainError::InvalidDueDate(text.to_owned()))
    }

    /// Creates a due date from a calendar day.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Wraps a persisted timestamp without normalising it.
    #[must_use]
    pub const fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// Returns the due date as a timestamp.
    #[must_use]
    pub const fn timestamp(self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}
