//! `SQLite` adapters for task persistence.

mod connection;
mod models;
mod repository;
mod schema;

pub use connection::{DatabaseUrl, DatabaseUrlError, TaskSqlitePool};
pub use repository::SqliteTaskRepository;
