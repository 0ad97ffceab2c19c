//! CRUD round-trips against private in-memory `SQLite` databases.

use super::helpers::{FixedClock, instant, new_task, open_in_memory};
use taskmanager::task::{
    domain::{DueDate, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};

#[tokio::test(flavor = "multi_thread")]
async fn empty_store_lists_nothing() {
    let repository = open_in_memory().await;

    let tasks = repository.find_all().await.expect("listing should succeed");

    assert!(tasks.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_round_trips_every_field() {
    let repository = open_in_memory().await;
    let at = instant(2030, 5, 1, 8, 15, 123_456);

    let created = repository
        .create(&new_task("Buy milk", Some("2099-01-01"), at))
        .await
        .expect("insert should succeed");
    let fetched = repository
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(created.id(), TaskId::new(1));
    assert_eq!(fetched, created);
    assert_eq!(fetched.title().as_str(), "Buy milk");
    assert_eq!(fetched.description(), "Buy milk details");
    assert!(!fetched.is_completed());
    assert_eq!(fetched.completed_at(), None);
    assert_eq!(fetched.created_at(), at);
    assert_eq!(fetched.updated_at(), at);
    assert_eq!(
        fetched.due_date().map(|due_date| due_date.to_string()),
        Some("2099-01-01".to_owned())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn find_all_orders_newest_first() {
    let repository = open_in_memory().await;
    let older = repository
        .create(&new_task("older", None, instant(2030, 5, 1, 8, 0, 0)))
        .await
        .expect("insert should succeed");
    let newer = repository
        .create(&new_task("newer", None, instant(2030, 5, 2, 8, 0, 0)))
        .await
        .expect("insert should succeed");
    let tie = repository
        .create(&new_task("tie", None, instant(2030, 5, 2, 8, 0, 0)))
        .await
        .expect("insert should succeed");

    let tasks = repository.find_all().await.expect("listing should succeed");

    let ids: Vec<TaskId> = tasks.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![tie.id(), newer.id(), older.id()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_mutable_fields() {
    let repository = open_in_memory().await;
    let mut task = repository
        .create(&new_task(
            "Buy milk",
            Some("2030-05-02"),
            instant(2030, 5, 1, 8, 0, 0),
        ))
        .await
        .expect("insert should succeed");

    task.apply_patch(
        TaskPatch {
            title: Some(TaskTitle::new("Buy oat milk").expect("valid title")),
            description: Some(String::new()),
            due_date: Some(None),
        },
        &FixedClock(instant(2030, 5, 1, 9, 0, 0)),
    );
    task.complete(&FixedClock(instant(2030, 5, 1, 10, 0, 500)));
    repository.update(&task).await.expect("update should succeed");
    let fetched = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, task);
    assert_eq!(fetched.title().as_str(), "Buy oat milk");
    assert_eq!(fetched.description(), "");
    assert_eq!(fetched.due_date(), None);
    assert!(fetched.is_completed());
    assert_eq!(fetched.completed_at(), Some(instant(2030, 5, 1, 10, 0, 500)));
    assert_eq!(fetched.created_at(), instant(2030, 5, 1, 8, 0, 0));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_row_is_not_found() {
    let repository = open_in_memory().await;
    let task = repository
        .create(&new_task("ephemeral", None, instant(2030, 5, 1, 8, 0, 0)))
        .await
        .expect("insert should succeed");
    assert!(
        repository
            .delete(task.id())
            .await
            .expect("delete should succeed")
    );

    let result = repository.update(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_whether_a_row_was_removed() {
    let repository = open_in_memory().await;
    let task = repository
        .create(&new_task("ephemeral", None, instant(2030, 5, 1, 8, 0, 0)))
        .await
        .expect("insert should succeed");

    let first = repository
        .delete(task.id())
        .await
        .expect("delete should succeed");
    let second = repository
        .delete(task.id())
        .await
        .expect("delete should succeed");
    let lookup = repository.find_by_id(task.id()).await;

    assert!(first);
    assert!(!second);
    assert!(matches!(lookup, Err(TaskRepositoryError::NotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn due_dates_keep_date_precision() {
    let repository = open_in_memory().await;
    let due_date = DueDate::parse("2030-02-28").expect("valid due date");

    let created = repository
        .create(&new_task(
            "Leap check",
            Some("2030-02-28"),
            instant(2030, 1, 1, 0, 0, 0),
        ))
        .await
        .expect("insert should succeed");
    let fetched = repository
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched.due_date(), Some(due_date));
    assert!(
        fetched.is_pending_due_before(instant(2030, 2, 28, 0, 0, 1)),
        "midnight due date should precede the following microsecond"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_databases_are_private() {
    let first = open_in_memory().await;
    let second = open_in_memory().await;
    first
        .create(&new_task("only here", None, instant(2030, 5, 1, 8, 0, 0)))
        .await
        .expect("insert should succeed");

    let visible = second.find_all().await.expect("listing should succeed");

    assert!(visible.is_empty());
}
