//! File-backed `SQLite` databases and connection strings.

use super::helpers::{FixedClock, instant, new_task};
use rstest::rstest;
use std::sync::Arc;
use taskmanager::task::{
    adapters::sqlite::{DatabaseUrl, DatabaseUrlError, SqliteTaskRepository},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService},
};

fn file_url(dir: &tempfile::TempDir) -> DatabaseUrl {
    let path = dir.path().join("tasks.db");
    DatabaseUrl::parse(&format!("sqlite3://{}", path.display())).expect("valid URL")
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_keeps_tasks_and_reinitialising_is_harmless() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let url = file_url(&dir);

    let created = {
        let repository = SqliteTaskRepository::open(&url)
            .await
            .expect("file store should open");
        repository
            .create(&new_task("persisted", Some("2030-05-02"), instant(2030, 5, 1, 8, 0, 0)))
            .await
            .expect("insert should succeed")
    };

    let reopened = SqliteTaskRepository::open(&url)
        .await
        .expect("file store should reopen");
    reopened
        .initialize()
        .await
        .expect("schema creation is idempotent");
    let tasks = reopened.find_all().await.expect("listing should succeed");

    assert_eq!(tasks, vec![created]);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_writers_share_a_file_store() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let repository = Arc::new(
        SqliteTaskRepository::open(&file_url(&dir))
            .await
            .expect("file store should open"),
    );

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let writer = Arc::clone(&repository);
            tokio::spawn(async move {
                writer
                    .create(&new_task(
                        &format!("task {index}"),
                        None,
                        instant(2030, 5, 1, 8, 0, index),
                    ))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("writer should not panic")
            .expect("insert should succeed");
    }

    let tasks = repository.find_all().await.expect("listing should succeed");
    assert_eq!(tasks.len(), 8);
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_title_leaves_the_file_store_empty() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let repository = Arc::new(
        SqliteTaskRepository::open(&file_url(&dir))
            .await
            .expect("file store should open"),
    );
    let service = TaskService::new(
        Arc::clone(&repository),
        Arc::new(FixedClock(instant(2030, 5, 1, 8, 0, 0))),
    );

    let result = service
        .create(CreateTaskRequest::new("  ").with_due_date("2099-01-01"))
        .await;

    let error = result.expect_err("blank titles are rejected");
    assert!(error.is_validation());
    assert!(
        repository
            .find_all()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[case::sqlite3("sqlite3://tasks.db", "tasks.db")]
#[case::sqlite("sqlite:///var/lib/tasks.db", "/var/lib/tasks.db")]
#[case::upper_case_scheme("SQLITE3://tasks.db", "tasks.db")]
#[case::memory("sqlite3://:memory:", ":memory:")]
fn supported_urls_parse(#[case] raw: &str, #[case] path: &str) {
    let url = DatabaseUrl::parse(raw).expect("supported URL");

    assert_eq!(url.path(), path);
}

#[rstest]
#[case::no_separator("tasks.db", DatabaseUrlError::Malformed("tasks.db".to_owned()))]
#[case::empty_path("sqlite3://", DatabaseUrlError::Malformed("sqlite3://".to_owned()))]
#[case::other_engine(
    "postgres://localhost/tasks",
    DatabaseUrlError::UnsupportedScheme("postgres".to_owned())
)]
fn unsupported_urls_are_rejected(#[case] raw: &str, #[case] expected: DatabaseUrlError) {
    assert_eq!(DatabaseUrl::parse(raw), Err(expected));
}
