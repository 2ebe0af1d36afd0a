//! User model and database operations.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     username TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     created_at DATETIME NOT NULL
//! );
//! ```
//!
//! The username is immutable after creation and globally unique; the
//! uniqueness constraint is enforced by the store, not checked up front, so
//! a failed insert leaves no partial state behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User model representing an account.
///
/// Passwords are stored as Argon2id PHC strings, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store
    pub id: i64,

    /// Username, unique across all users and immutable after creation
    pub username: String,

    /// Argon2id password hash
    ///
    /// Never serialized out of the process.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT a plaintext password!)
    pub password_hash: String,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique constraint
    /// violation) or the database operation fails. Callers map the unique
    /// violation to their own duplicate-username error.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts total number of users.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            username: "alice".to_string(),
            password_hash: "$argon2id$hash".to_string(),
        };

        assert_eq!(create_user.username, "alice");
        assert_eq!(create_user.password_hash, "$argon2id$hash");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).expect("serialization should succeed");
        assert!(!json.contains("argon2id"));
        assert!(json.contains("alice"));
    }

    // Integration tests for database operations are in tests/accounts_tests.rs
}
