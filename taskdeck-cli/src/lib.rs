//! # Taskdeck CLI
//!
//! The interactive front end of the Taskdeck task tracker.
//!
//! ## Module Organization
//!
//! - `config`: environment-based configuration
//! - `shell`: the interactive menu loop

pub mod config;
pub mod shell;

/// Current version of the Taskdeck CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
