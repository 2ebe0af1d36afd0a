//! Database models for Taskdeck.
//!
//! This module contains the two persisted record types and their CRUD
//! operations. These are the only durable relations the tool owns.
//!
//! # Models
//!
//! - `user`: accounts with a unique username and a hashed credential
//! - `task`: units of work, optionally due-dated and optionally owned
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_core::models::user::{CreateUser, User};
//! use taskdeck_core::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let user = User::create(
//!     &pool,
//!     CreateUser {
//!         username: "alice".to_string(),
//!         password_hash: "$argon2id$...".to_string(),
//!     },
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod task;
pub mod user;
