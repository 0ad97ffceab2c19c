//! `SQLite` repository implementation for task storage.

use super::{
    connection::{DatabaseUrl, TaskSqlitePool},
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::{CREATE_TASKS_TABLE, tasks},
};
use crate::task::{
    domain::{DueDate, NewTask, PersistedTaskData, Task, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database at `url` and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
    /// built or the schema cannot be created.
    pub async fn open(url: &DatabaseUrl) -> TaskRepositoryResult<Self> {
        let target = url.clone();
        let pool = tokio::task::spawn_blocking(move || target.build_pool())
            .await
            .map_err(TaskRepositoryError::persistence)?
            .map_err(TaskRepositoryError::persistence)?;
        let repository = Self::new(pool);
        repository.initialize().await?;
        debug!(database = %url, "task store ready");
        Ok(repository)
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn initialize(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_TABLE)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.ok_or(TaskRepositoryError::NotFound(id))
                .and_then(row_to_task)
        })
        .await
    }

    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_new_row(task);
        let pending = task.clone();

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(pending.into_task(TaskId::new(id)))
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        completed: false,
        due_date: task.due_date().map(|due_date| due_date.timestamp().naive_utc()),
        completed_at: None,
        created_at: task.created_at().naive_utc(),
        updated_at: task.created_at().naive_utc(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        completed: task.is_completed(),
        due_date: task.due_date().map(|due_date| due_date.timestamp().naive_utc()),
        completed_at: task.completed_at().map(|at| at.naive_utc()),
        updated_at: task.updated_at().naive_utc(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        completed,
        due_date,
        completed_at,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        completed,
        due_date: due_date.map(|at| DueDate::from_timestamp(as_utc(at))),
        completed_at: completed_at.map(as_utc),
        created_at: as_utc(created_at),
        updated_at: as_utc(updated_at),
    };
    Ok(Task::from_persisted(data))
}

fn as_utc(timestamp: NaiveDateTime) -> DateTime<Utc> {
    timestamp.and_utc()
}
