//! The cart pricing engine.
//!
//! Given a list of (product, quantity) pairs, resolves each product through
//! the [`CatalogGateway`], applies at most one promotion per line, and
//! returns a fully priced [`CalculatedCart`].
//!
//! The engine is stateless and borrows the gateway per calculation; it is
//! safe to call concurrently from multiple tasks as long as the gateway
//! supports concurrent reads.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::{CalculatedCart, CalculatedLine, CartLineInput};
use crate::catalog::{Promotion, PromotionKind};
use crate::gateway::{CatalogGateway, GatewayError};
use crate::types::ProductId;

/// Upper bound on a single line's quantity.
///
/// Keeps the decimal arithmetic far away from overflow territory; carts at
/// this scale are a data-entry mistake, not an order.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Errors that abort a cart calculation.
///
/// Promotion-lookup failures are deliberately absent: those degrade to
/// "no promotions for this line" instead of failing the calculation.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A cart line references a product that does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// A cart line carries a non-positive or absurdly large quantity.
    #[error("invalid quantity {quantity} for product {product_id}: must be between 1 and {MAX_LINE_QUANTITY}")]
    InvalidQuantity {
        product_id: ProductId,
        quantity: i64,
    },

    /// The gateway failed while resolving a product.
    #[error("failed to resolve product {product_id}")]
    Gateway {
        product_id: ProductId,
        #[source]
        source: GatewayError,
    },
}

/// Prices carts against a catalog gateway.
///
/// The gateway is an explicitly injected dependency so the engine can be
/// exercised with an in-memory fake.
#[derive(Debug, Clone)]
pub struct PricingEngine<G> {
    gateway: G,
}

impl<G> PricingEngine<G> {
    /// Create an engine over the given catalog gateway.
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

impl<G: CatalogGateway> PricingEngine<G> {
    /// Price a cart.
    ///
    /// Lines are processed in input order and returned in input order. The
    /// whole calculation aborts on the first unresolvable product; there are
    /// no partial results.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidQuantity`] for quantities outside
    /// `1..=MAX_LINE_QUANTITY`, [`PricingError::ProductNotFound`] when a
    /// referenced product does not exist, and [`PricingError::Gateway`] when
    /// product resolution itself fails. Promotion-lookup failures never
    /// surface as errors; the affected line is priced without promotions.
    pub async fn calculate_cart(
        &self,
        lines: &[CartLineInput],
    ) -> Result<CalculatedCart, PricingError> {
        if lines.is_empty() {
            return Ok(CalculatedCart::empty());
        }

        let mut calculated = Vec::with_capacity(lines.len());
        let mut subtotal = Decimal::ZERO;
        let mut total_discount = Decimal::ZERO;

        for line in lines {
            if line.quantity < 1 || line.quantity > MAX_LINE_QUANTITY {
                return Err(PricingError::InvalidQuantity {
                    product_id: line.product_id,
                    quantity: line.quantity,
                });
            }

            let product = self
                .gateway
                .product(line.product_id)
                .await
                .map_err(|source| PricingError::Gateway {
                    product_id: line.product_id,
                    source,
                })?
                .ok_or(PricingError::ProductNotFound(line.product_id))?;

            // A promotion-lookup failure must never block checkout pricing:
            // degrade to "no promotions apply" and keep going.
            let promotions = match self.gateway.promotions_for_product(product.id).await {
                Ok(promotions) => promotions,
                Err(error) => {
                    tracing::warn!(
                        product_id = %product.id,
                        error = %error,
                        "promotion lookup failed; pricing line without promotions"
                    );
                    Vec::new()
                }
            };

            let quantity = Decimal::from(line.quantity);
            let mut effective_unit_price = product.base_price;
            let mut applied_promotion_id = None;
            let mut discount_amount = Decimal::ZERO;

            if let Some(promotion) = select_promotion(&promotions, product.id) {
                let per_unit = unit_discount(promotion, product.base_price);
                effective_unit_price = product.base_price - per_unit;
                discount_amount = per_unit * quantity;
                applied_promotion_id = Some(promotion.id);
            }

            let line_total = effective_unit_price * quantity;
            subtotal += product.base_price * quantity;
            total_discount += discount_amount;

            calculated.push(CalculatedLine {
                product_id: product.id,
                product_name: product.name,
                quantity: line.quantity,
                original_unit_price: product.base_price,
                effective_unit_price,
                line_total,
                applied_promotion_id,
                discount_amount,
            });
        }

        let final_total = subtotal - total_discount;
        Ok(CalculatedCart {
            lines: calculated,
            subtotal,
            total_discount,
            final_total,
        })
    }
}

/// Select the promotion to apply to a line: the first applicable one in
/// gateway order.
///
/// First match wins even when a later candidate would discount more. A
/// future "best discount wins" policy only needs to change this function.
fn select_promotion(promotions: &[Promotion], product_id: ProductId) -> Option<&Promotion> {
    promotions
        .iter()
        .find(|promotion| applies_to(promotion, product_id))
}

/// Whether a promotion may be applied to the given product.
fn applies_to(promotion: &Promotion, product_id: ProductId) -> bool {
    // Defensive re-check: the gateway already filtered by target product.
    if promotion.target_product_id != product_id {
        return false;
    }
    match promotion.kind {
        PromotionKind::PercentageDiscount => {
            let in_range =
                promotion.value >= Decimal::ZERO && promotion.value <= Decimal::ONE_HUNDRED;
            if !in_range {
                // The API rejects these on create; a hand-edited row must not
                // price a line negative.
                tracing::warn!(
                    promotion_id = %promotion.id,
                    value = %promotion.value,
                    "skipping promotion with out-of-range percentage"
                );
            }
            in_range
        }
    }
}

/// Per-unit discount for an applicable promotion, dispatched on its kind.
fn unit_discount(promotion: &Promotion, base_price: Decimal) -> Decimal {
    match promotion.kind {
        PromotionKind::PercentageDiscount => base_price * promotion.value / Decimal::ONE_HUNDRED,
    }
}
