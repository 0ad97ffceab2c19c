//! Diesel schema for task persistence.

diesel::table! {
    /// To-do items.
    tasks (id) {
        /// Auto-incremented task identifier.
        id -> BigInt,
        /// Non-empty title.
        title -> Text,
        /// Free-form description, empty when not provided.
        description -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Optional due date at midnight UTC.
        due_date -> Nullable<Timestamp>,
        /// Latest completion timestamp.
        completed_at -> Nullable<Timestamp>,
        /// Creation timestamp.
        created_at -> Timestamp,
        /// Last mutation timestamp.
        updated_at -> Timestamp,
    }
}

/// DDL for the `tasks` table; safe to run repeatedly.
pub const CREATE_TASKS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id INTEGER PRIMARY KEY AUTOINCREMENT, ",
    "title TEXT NOT NULL, ",
    "description TEXT NOT NULL DEFAULT '', ",
    "completed BOOLEAN NOT NULL DEFAULT FALSE, ",
    "due_date TIMESTAMP, ",
    "completed_at TIMESTAMP, ",
    "created_at TIMESTAMP NOT NULL, ",
    "updated_at TIMESTAMP NOT NULL",
    ");",
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at);",
);
