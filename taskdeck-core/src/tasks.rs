//! Task lifecycle operations.
//!
//! Composes the validator with the task store: every operation validates its
//! raw inputs first and only then touches the database, so no error here
//! ever leaves partially written state. Each call is its own atomic unit —
//! there are no transactions spanning operations.

use sqlx::SqlitePool;
use tracing::info;

use crate::models::task::{NewTask, Task, TaskChanges};
use crate::validate::{parse_due_date, validate_description, validate_title, ValidationError};

/// Errors from the task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No task with the given ID
    #[error("task {0} not found")]
    NotFound(i64),

    /// A field failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Creates a task from raw field values.
///
/// All three fields are validated before the insert. The authenticated
/// user's ID is attached as the task's owner; pass `None` for an unowned
/// task.
///
/// # Errors
///
/// [`TaskError::Validation`] for an empty title/description or a malformed
/// due date.
pub async fn add_task(
    pool: &SqlitePool,
    raw_title: &str,
    raw_description: &str,
    raw_due_date: &str,
    owner: Option<i64>,
) -> Result<Task, TaskError> {
    let title = validate_title(raw_title)?;
    let description = validate_description(raw_description)?;
    let due_date = parse_due_date(raw_due_date)?;

    let task = Task::create(
        pool,
        NewTask {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            user_id: owner,
        },
    )
    .await?;

    info!(task_id = task.id, owner = ?owner, "Task created");
    Ok(task)
}

/// Fetches a single task.
///
/// # Errors
///
/// [`TaskError::NotFound`] when the ID does not exist.
pub async fn get_task(pool: &SqlitePool, id: i64) -> Result<Task, TaskError> {
    Task::find_by_id(pool, id)
        .await?
        .ok_or(TaskError::NotFound(id))
}

/// Lists all tasks, ordered by ID ascending.
pub async fn list_tasks(pool: &SqlitePool) -> Result<Vec<Task>, TaskError> {
    Ok(Task::list_all(pool).await?)
}

/// Overwrites a task's title and description, and its due date only when a
/// non-empty value was supplied.
///
/// Validation happens before any write: a malformed due date rejects the
/// whole update, leaving the stored row untouched. Empty due-date input
/// means "leave the current due date as it is". Existence is re-checked by
/// the update statement itself, not against a previously fetched list.
///
/// # Errors
///
/// [`TaskError::Validation`] for bad fields, [`TaskError::NotFound`] when
/// the ID does not exist.
pub async fn update_task(
    pool: &SqlitePool,
    id: i64,
    raw_title: &str,
    raw_description: &str,
    raw_due_date: &str,
) -> Result<Task, TaskError> {
    let title = validate_title(raw_title)?;
    let description = validate_description(raw_description)?;
    let due_date = parse_due_date(raw_due_date)?;

    let task = Task::update(
        pool,
        id,
        TaskChanges {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
        },
    )
    .await?
    .ok_or(TaskError::NotFound(id))?;

    info!(task_id = id, "Task updated");
    Ok(task)
}

/// Deletes a task by ID.
///
/// Existence is verified at deletion time; deleting a missing ID fails with
/// [`TaskError::NotFound`] and changes nothing, so the failure is
/// idempotent.
pub async fn delete_task(pool: &SqlitePool, id: i64) -> Result<(), TaskError> {
    if Task::delete(pool, id).await? {
        info!(task_id = id, "Task deleted");
        Ok(())
    } else {
        Err(TaskError::NotFound(id))
    }
}

/// Marks a task complete.
///
/// # Errors
///
/// [`TaskError::NotFound`] when the ID does not exist.
pub async fn complete_task(pool: &SqlitePool, id: i64) -> Result<Task, TaskError> {
    let task = Task::set_completed(pool, id)
        .await?
        .ok_or(TaskError::NotFound(id))?;

    info!(task_id = id, "Task marked complete");
    Ok(task)
}
