//! Credential handling for Taskdeck.
//!
//! # Modules
//!
//! - [`password`]: Argon2id hashing/verification and the password policy
//! - [`accounts`]: registration and authentication over the user store
//!
//! Plaintext passwords live only on the stack of the functions that take
//! them; they are never persisted, serialized, or logged.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_core::auth::accounts;
//! use taskdeck_core::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//!
//! let user_id = accounts::register(&pool, "alice", "Str0ng!Pass").await?;
//! assert_eq!(accounts::authenticate(&pool, "alice", "Str0ng!Pass").await?, user_id);
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod password;
