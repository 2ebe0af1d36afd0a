//! Database layer for Taskdeck.
//!
//! This module provides SQLite connection pooling and embedded migrations.
//!
//! # Modules
//!
//! - `pool`: SQLite connection pool management with health checks
//! - `migrations`: embedded migration runner
//!
//! Models live in the `models` module at the crate root.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_core::db::pool::{create_pool, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "sqlite://taskdeck.db".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let pool = create_pool(config).await?;
//!     Ok(())
//! }
//! ```

pub mod migrations;
pub mod pool;
