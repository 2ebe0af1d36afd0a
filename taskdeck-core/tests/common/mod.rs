//! Shared helpers for integration tests.
//!
//! Tests run against an in-memory SQLite database. The pool is capped at a
//! single connection because every `sqlite::memory:` connection opens its
//! own private database.

use sqlx::SqlitePool;
use taskdeck_core::db::migrations::run_migrations;
use taskdeck_core::db::pool::{create_pool, DatabaseConfig};

pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    })
    .await
    .expect("in-memory pool should be created");

    run_migrations(&pool).await.expect("migrations should run");
    pool
}
