//! Boundary traits for persistence collaborators.
//!
//! The pricing engine never talks to storage directly; it borrows read access
//! through [`CatalogGateway`] for the duration of one calculation. Cart
//! persistence goes through [`CartStore`]. The server implements both over
//! SQLite; unit tests implement them in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::cart::{CalculatedCart, SavedCart};
use crate::catalog::{Product, Promotion};
use crate::types::{CartId, ProductId};

/// An I/O failure inside a persistence collaborator.
///
/// Opaque to the core: the engine only decides whether to abort (product
/// resolution) or degrade (promotion lookup), never how to repair it.
#[derive(Debug, Error)]
#[error("gateway error: {0}")]
pub struct GatewayError(#[source] Box<dyn std::error::Error + Send + Sync + 'static>);

impl GatewayError {
    /// Wrap a backend error.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self(source.into())
    }
}

/// Read access to the product and promotion catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Look up a product by ID. `Ok(None)` means the product does not exist.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, GatewayError>;

    /// Promotions whose target product ID equals `product_id`.
    ///
    /// The returned order determines the first-match tie-break during
    /// promotion selection and must be stable across calls for reproducible
    /// pricing.
    async fn promotions_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Promotion>, GatewayError>;
}

/// Persistence for calculated carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Persist a calculated cart, assigning identity and creation timestamp
    /// atomically.
    ///
    /// A save failure does not invalidate the computed cart; callers may
    /// retry with the same value.
    async fn save_cart(
        &self,
        cart: &CalculatedCart,
    ) -> Result<(CartId, DateTime<Utc>), GatewayError>;

    /// Load a previously saved cart. `Ok(None)` means no cart has that ID.
    async fn saved_cart(&self, id: CartId) -> Result<Option<SavedCart>, GatewayError>;
}
