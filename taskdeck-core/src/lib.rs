//! # Taskdeck Core
//!
//! Shared library for the Taskdeck CLI task tracker: data models, the
//! storage gateway over SQLite, credential handling, and task validation.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and embedded migrations
//! - `models`: the `users` and `tasks` relations with their CRUD operations
//! - `auth`: Argon2id password hashing, the password policy, and the
//!   register/authenticate flows
//! - `validate`: input-shape rules for task fields
//! - `tasks`: lifecycle operations composing the validator with the store

pub mod auth;
pub mod db;
pub mod models;
pub mod tasks;
pub mod validate;

/// Current version of the Taskdeck core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
