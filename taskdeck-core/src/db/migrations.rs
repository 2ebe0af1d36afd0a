//! Database migration runner.
//!
//! Migrations live in the `migrations/` directory at the crate root and are
//! embedded into the binary with [`sqlx::migrate!`]. They are applied
//! explicitly from `main` after the pool is constructed, so the schema is
//! never mutated as a side effect of importing a module.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_core::db::migrations::run_migrations;
//! use taskdeck_core::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig {
//!     url: "sqlite://taskdeck.db".to_string(),
//!     ..Default::default()
//! })
//! .await?;
//!
//! run_migrations(&pool).await?;
//! # Ok(())
//! # }
//! ```

use sqlx::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations.
///
/// Already-applied migrations are skipped; sqlx tracks them in the
/// `_sqlx_migrations` table.
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the connection is lost mid-run.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
