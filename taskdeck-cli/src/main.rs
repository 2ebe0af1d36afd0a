//! # Taskdeck
//!
//! A single-user interactive task tracker backed by SQLite. Register or log
//! in, then add, list, inspect, update, complete, and delete tasks with an
//! optional `YYYY-MM-DD HH:MM` due date.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-cli
//! ```

use taskdeck_cli::config::Config;
use taskdeck_cli::shell;
use taskdeck_core::db::migrations::run_migrations;
use taskdeck_core::db::pool::{close_pool, create_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the interactive menu.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdeck_cli=info,taskdeck_core=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Taskdeck v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(config.database_config()).await?;
    run_migrations(&pool).await?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    shell::run(&pool, &mut input, &mut out).await?;

    close_pool(pool).await;
    Ok(())
}
