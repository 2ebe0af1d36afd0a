//! Configuration management for the CLI.
//!
//! Loaded from environment variables (with `.env` support for development).
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://taskdeck.db`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `RUST_LOG`: log filter (default: info for the taskdeck crates)
//!
//! # Example
//!
//! ```no_run
//! use taskdeck_cli::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Using database {}", config.database.url);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use taskdeck_core::db::pool::DatabaseConfig;

/// Default database location when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite://taskdeck.db";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseSettings,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable has an unparseable value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        Ok(Self {
            database: DatabaseSettings {
                url,
                max_connections,
            },
        })
    }

    /// Builds the pool configuration for `taskdeck_core::db::pool::create_pool`.
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}
