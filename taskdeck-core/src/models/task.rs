//! Task model and database operations.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     created_at DATETIME NOT NULL,
//!     due_date DATETIME,
//!     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     user_id INTEGER REFERENCES users(id) ON DELETE SET NULL
//! );
//! ```
//!
//! A task may exist without an owner; the user reference is a relational
//! association, not object ownership. Stored titles and descriptions are
//! never empty — the `tasks` operations layer validates before any write.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task model representing a unit of work.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the store
    pub id: i64,

    /// Task title (never empty once stored)
    pub title: String,

    /// Task description (never empty once stored)
    pub description: String,

    /// When the task was created; immutable
    pub created_at: DateTime<Utc>,

    /// Optional due date, as entered by the user (no timezone attached)
    pub due_date: Option<NaiveDateTime>,

    /// Whether the task has been marked complete
    pub is_completed: bool,

    /// Owning user, if any (nulled when the user is deleted)
    pub user_id: Option<i64>,
}

/// Input for creating a new task.
///
/// `created_at` is set by the constructor and `is_completed` starts false.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title (validated non-empty by the caller)
    pub title: String,

    /// Task description (validated non-empty by the caller)
    pub description: String,

    /// Optional due date
    pub due_date: Option<NaiveDateTime>,

    /// Owning user, if any
    pub user_id: Option<i64>,
}

/// Field overwrites for an existing task.
///
/// Title and description always overwrite. A `None` due date means "leave
/// the stored due date unchanged" — the update flow treats empty input as
/// no change, so a due date is only replaced when a new value is supplied.
#[derive(Debug, Clone)]
pub struct TaskChanges {
    /// New title (validated non-empty by the caller)
    pub title: String,

    /// New description (validated non-empty by the caller)
    pub description: String,

    /// Replacement due date, or None to keep the current one
    pub due_date: Option<NaiveDateTime>,
}

impl Task {
    /// Creates a new task.
    ///
    /// Sets `created_at` to the current time and `is_completed` to false.
    pub async fn create(pool: &SqlitePool, data: NewTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, created_at, due_date, is_completed, user_id)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING id, title, description, created_at, due_date, is_completed, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(Utc::now())
        .bind(data.due_date)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_at, due_date, is_completed, user_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, ordered by ID ascending.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_at, due_date, is_completed, user_id
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites title and description, and the due date only when a new
    /// value is supplied.
    ///
    /// The COALESCE keeps the stored due date when `changes.due_date` binds
    /// as NULL, making "empty input means unchanged" a single atomic
    /// statement. Returns the updated task, or None if the ID no longer
    /// exists — existence is checked here at update time, not against a
    /// previously fetched list.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        changes: TaskChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                due_date = COALESCE($4, due_date)
            WHERE id = $1
            RETURNING id, title, description, created_at, due_date, is_completed, user_id
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Marks a task complete.
    ///
    /// Returns the updated task, or None if the ID does not exist.
    pub async fn set_completed(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = TRUE
            WHERE id = $1
            RETURNING id, title, description, created_at, due_date, is_completed, user_id
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task.
    ///
    /// Returns true if a row was removed, false if the ID did not exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of tasks.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_struct() {
        let new_task = NewTask {
            title: "Buy milk".to_string(),
            description: "Two liters".to_string(),
            due_date: None,
            user_id: Some(1),
        };

        assert_eq!(new_task.title, "Buy milk");
        assert!(new_task.due_date.is_none());
    }

    // Integration tests for database operations are in tests/tasks_tests.rs
}
