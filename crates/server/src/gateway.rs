//! SQLite-backed implementation of the core persistence gateways.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pricebook_core::{
    CalculatedCart, CartId, CartStore, CatalogGateway, GatewayError, Product, ProductId,
    Promotion, SavedCart,
};

use crate::db::{CartRepository, ProductRepository, PromotionRepository};

/// SQLite gateway handed to the pricing engine and the cart routes.
///
/// Cheap to clone; wraps the shared connection pool.
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Create a gateway over the given pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogGateway for SqliteGateway {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, GatewayError> {
        ProductRepository::new(&self.pool)
            .get(id)
            .await
            .map_err(GatewayError::new)
    }

    async fn promotions_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Promotion>, GatewayError> {
        PromotionRepository::new(&self.pool)
            .list_for_product(product_id)
            .await
            .map_err(GatewayError::new)
    }
}

#[async_trait]
impl CartStore for SqliteGateway {
    async fn save_cart(
        &self,
        cart: &CalculatedCart,
    ) -> Result<(CartId, DateTime<Utc>), GatewayError> {
        CartRepository::new(&self.pool)
            .save(cart)
            .await
            .map_err(GatewayError::new)
    }

    async fn saved_cart(&self, id: CartId) -> Result<Option<SavedCart>, GatewayError> {
        CartRepository::new(&self.pool)
            .get(id)
            .await
            .map_err(GatewayError::new)
    }
}
