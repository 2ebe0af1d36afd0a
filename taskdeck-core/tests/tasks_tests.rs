//! Integration tests for the task lifecycle operations.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::test_pool;
use taskdeck_core::models::task::Task;
use taskdeck_core::tasks::{
    add_task, complete_task, delete_task, get_task, list_tasks, update_task, TaskError,
};
use taskdeck_core::validate::ValidationError;

fn due(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, 0)
        .expect("valid time")
}

#[tokio::test]
async fn test_add_task_attaches_owner_and_defaults() {
    let pool = test_pool().await;

    let task = add_task(&pool, "Buy milk", "Two liters", "2024-01-05 09:30", Some(42))
        .await
        .expect("add should succeed");

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "Two liters");
    assert_eq!(task.due_date, Some(due(2024, 1, 5, 9, 30)));
    assert!(!task.is_completed);
    assert_eq!(task.user_id, Some(42));
}

#[tokio::test]
async fn test_add_task_without_due_date_or_owner() {
    let pool = test_pool().await;

    let task = add_task(&pool, "Buy milk", "Two liters", "", None)
        .await
        .expect("add should succeed");

    assert!(task.due_date.is_none());
    assert!(task.user_id.is_none());
}

#[tokio::test]
async fn test_add_task_rejects_invalid_fields_without_writing() {
    let pool = test_pool().await;

    let cases: [(&str, &str, &str, ValidationError); 3] = [
        ("", "desc", "", ValidationError::EmptyTitle),
        ("title", "", "", ValidationError::EmptyDescription),
        ("title", "desc", "tomorrow", ValidationError::InvalidDateFormat),
    ];

    for (title, description, due_date, expected) in cases {
        let result = add_task(&pool, title, description, due_date, None).await;
        match result {
            Err(TaskError::Validation(e)) => assert_eq!(e, expected),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    let count = Task::count(&pool).await.expect("count should succeed");
    assert_eq!(count, 0, "rejected input must not be persisted");
}

#[tokio::test]
async fn test_list_tasks_ordered_by_id_ascending() {
    let pool = test_pool().await;

    for title in ["first", "second", "third"] {
        add_task(&pool, title, "desc", "", None)
            .await
            .expect("add should succeed");
    }

    let tasks = list_tasks(&pool).await.expect("list should succeed");
    assert_eq!(tasks.len(), 3);
    assert!(tasks.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(tasks[0].title, "first");
    assert_eq!(tasks[2].title, "third");
}

#[tokio::test]
async fn test_get_task_not_found() {
    let pool = test_pool().await;

    let result = get_task(&pool, 99).await;
    assert!(matches!(result, Err(TaskError::NotFound(99))));
}

#[tokio::test]
async fn test_update_task_empty_due_date_preserves_existing() {
    let pool = test_pool().await;

    let task = add_task(&pool, "title", "desc", "2024-01-05 09:30", None)
        .await
        .expect("add should succeed");

    let updated = update_task(&pool, task.id, "new title", "new desc", "")
        .await
        .expect("update should succeed");

    assert_eq!(updated.title, "new title");
    assert_eq!(updated.description, "new desc");
    assert_eq!(
        updated.due_date,
        Some(due(2024, 1, 5, 9, 30)),
        "empty due-date input must leave the stored value untouched"
    );
}

#[tokio::test]
async fn test_update_task_replaces_due_date() {
    let pool = test_pool().await;

    let task = add_task(&pool, "title", "desc", "2024-01-05 09:30", None)
        .await
        .expect("add should succeed");

    let updated = update_task(&pool, task.id, "title", "desc", "2025-12-31 23:59")
        .await
        .expect("update should succeed");

    assert_eq!(updated.due_date, Some(due(2025, 12, 31, 23, 59)));
}

#[tokio::test]
async fn test_update_task_malformed_due_date_mutates_nothing() {
    let pool = test_pool().await;

    let task = add_task(&pool, "title", "desc", "2024-01-05 09:30", None)
        .await
        .expect("add should succeed");

    let result = update_task(&pool, task.id, "new title", "new desc", "2024-1-5 9:30").await;
    assert!(matches!(
        result,
        Err(TaskError::Validation(ValidationError::InvalidDateFormat))
    ));

    let unchanged = get_task(&pool, task.id).await.expect("task should exist");
    assert_eq!(unchanged.title, "title", "rejected update must not mutate");
    assert_eq!(unchanged.due_date, Some(due(2024, 1, 5, 9, 30)));
}

#[tokio::test]
async fn test_update_task_not_found() {
    let pool = test_pool().await;

    let result = update_task(&pool, 7, "title", "desc", "").await;
    assert!(matches!(result, Err(TaskError::NotFound(7))));
}

#[tokio::test]
async fn test_delete_task_missing_id_is_idempotent_failure() {
    let pool = test_pool().await;

    add_task(&pool, "keep me", "desc", "", None)
        .await
        .expect("add should succeed");

    let result = delete_task(&pool, 99).await;
    assert!(matches!(result, Err(TaskError::NotFound(99))));

    let tasks = list_tasks(&pool).await.expect("list should succeed");
    assert_eq!(tasks.len(), 1, "failed delete must leave the list unchanged");
}

#[tokio::test]
async fn test_delete_task_removes_row() {
    let pool = test_pool().await;

    let task = add_task(&pool, "title", "desc", "", None)
        .await
        .expect("add should succeed");

    delete_task(&pool, task.id)
        .await
        .expect("delete should succeed");

    assert!(matches!(
        get_task(&pool, task.id).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_complete_task() {
    let pool = test_pool().await;

    let task = add_task(&pool, "title", "desc", "", None)
        .await
        .expect("add should succeed");
    assert!(!task.is_completed);

    let completed = complete_task(&pool, task.id)
        .await
        .expect("complete should succeed");
    assert!(completed.is_completed);

    assert!(matches!(
        complete_task(&pool, 99).await,
        Err(TaskError::NotFound(99))
    ));
}
