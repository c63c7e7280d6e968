//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pricebook migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PRICEBOOK_DATABASE_URL` - SQLite connection string (falls back to
//!   `DATABASE_URL`, then to the on-disk default)

use pricebook_server::config::{ConfigError, ServerConfig};
use pricebook_server::db;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply the embedded schema migrations to the configured database.
///
/// # Errors
///
/// Returns `MigrationError` if configuration, connection, or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
