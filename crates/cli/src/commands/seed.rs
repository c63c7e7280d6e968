//! Seed the database with a small sample catalog.
//!
//! Intended for local development: applies migrations, then inserts a few
//! products and a percentage promotion so the pricing endpoints have data to
//! work with.

use rust_decimal_macros::dec;
use tracing::info;

use pricebook_core::PromotionKind;
use pricebook_server::config::ServerConfig;
use pricebook_server::db::{self, ProductRepository, PromotionRepository};

use super::migrate::MigrationError;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),
}

/// Insert sample catalog data into the configured database.
///
/// # Errors
///
/// Returns `SeedError` if migration or any insert fails.
pub async fn run() -> Result<(), SeedError> {
    let config = ServerConfig::from_env().map_err(MigrationError::from)?;
    let pool = db::create_pool(&config.database_url)
        .await
        .map_err(MigrationError::from)?;
    db::run_migrations(&pool)
        .await
        .map_err(MigrationError::from)?;

    let products = ProductRepository::new(&pool);
    let promotions = PromotionRepository::new(&pool);

    let widget = products.create("Widget", dec!(10.00)).await?;
    let gadget = products.create("Gadget", dec!(24.50)).await?;
    let doohickey = products.create("Doohickey", dec!(3.99)).await?;
    info!(
        widget = %widget.id,
        gadget = %gadget.id,
        doohickey = %doohickey.id,
        "Seeded products"
    );

    let promo = promotions
        .create(
            "Widget launch sale",
            PromotionKind::PercentageDiscount,
            dec!(20),
            widget.id,
        )
        .await?;
    info!(promotion = %promo.id, "Seeded promotion");

    Ok(())
}
