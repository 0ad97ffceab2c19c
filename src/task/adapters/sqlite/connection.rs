//! Connection strings and pooling for the `SQLite` task store.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use diesel::sqlite::SqliteConnection;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// URL schemes accepted for `SQLite` databases.
const SQLITE_SCHEMES: [&str; 2] = ["sqlite", "sqlite3"];

/// Path that selects a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

/// Pool size for file-backed databases.
const FILE_POOL_SIZE: u32 = 8;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors returned while parsing a database connection string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatabaseUrlError {
    /// The value does not follow `scheme://path`.
    #[error("invalid database URL '{0}', expected scheme://path")]
    Malformed(String),

    /// The scheme names a database this service cannot open.
    #[error("unsupported database scheme '{0}', expected sqlite or sqlite3")]
    UnsupportedScheme(String),
}

/// Parsed `scheme://path` database location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    path: String,
}

impl DatabaseUrl {
    /// Parses a `sqlite://path` or `sqlite3://path` connection string.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseUrlError::Malformed`] when the separator or path is
    /// missing and [`DatabaseUrlError::UnsupportedScheme`] for other schemes.
    pub fn parse(value: &str) -> Result<Self, DatabaseUrlError> {
        let Some((scheme, path)) = value.split_once("://") else {
            return Err(DatabaseUrlError::Malformed(value.to_owned()));
        };
        if path.is_empty() {
            return Err(DatabaseUrlError::Malformed(value.to_owned()));
        }
        if !SQLITE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
            return Err(DatabaseUrlError::UnsupportedScheme(scheme.to_owned()));
        }
        Ok(Self {
            path: path.to_owned(),
        })
    }

    /// Returns an in-memory database location.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_owned(),
        }
    }

    /// Returns the filesystem path (or `:memory:`).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns whether the database lives only in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Builds a connection pool for this database.
    ///
    /// In-memory databases get a single long-lived connection so every
    /// caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError`] when the initial connections cannot be opened.
    pub fn build_pool(&self) -> Result<TaskSqlitePool, PoolError> {
        let manager = ConnectionManager::<SqliteConnection>::new(self.path.as_str());
        let builder = TaskSqlitePool::builder().connection_customizer(Box::new(SqlitePragmas {
            write_ahead_log: !self.is_in_memory(),
        }));
        let sized = if self.is_in_memory() {
            builder.max_size(1).idle_timeout(None).max_lifetime(None)
        } else {
            builder.max_size(FILE_POOL_SIZE)
        };
        sized.build(manager)
    }
}

impl FromStr for DatabaseUrl {
    type Err = DatabaseUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlite3://{}", self.path)
    }
}

/// Per-connection settings applied when the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    write_ahead_log: bool,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT.as_millis());
        if self.write_ahead_log {
            pragmas.push_str("PRAGMA journal_mode = WAL;PRAGMA synchronous = NORMAL;");
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}
