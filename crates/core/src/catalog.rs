//! Catalog domain types: products and promotions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ProductId, PromotionId};

/// A sellable product with an immutable identity and a base price.
///
/// Products are created once and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Base unit price before any discount. Non-negative.
    pub base_price: Decimal,
}

/// A promotion targeting a single product.
///
/// Multiple promotions may target the same product; the pricing engine
/// applies at most one per cart line (first match in gateway order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub name: String,
    pub kind: PromotionKind,
    /// Magnitude of the discount. For [`PromotionKind::PercentageDiscount`]
    /// this is the percentage (e.g. `20` for 20% off).
    pub value: Decimal,
    /// The single product this promotion applies to.
    pub target_product_id: ProductId,
}

/// Kind of promotion (how the discount is computed).
///
/// A closed enumeration: an unknown kind fails deserialization instead of
/// silently pricing a line undiscounted. New kinds (fixed amount, buy-N-get-M)
/// are added here together with their discount rule in the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionKind {
    /// Percentage off the product's base price.
    PercentageDiscount,
}

impl PromotionKind {
    /// Get the wire/storage string for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PercentageDiscount => "PERCENTAGE_DISCOUNT",
        }
    }
}

impl std::fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`PromotionKind`] from its storage string.
#[derive(Debug, Error)]
#[error("unknown promotion kind: {0}")]
pub struct ParsePromotionKindError(pub String);

impl std::str::FromStr for PromotionKind {
    type Err = ParsePromotionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PERCENTAGE_DISCOUNT" => Ok(Self::PercentageDiscount),
            other => Err(ParsePromotionKindError(other.to_owned())),
        }
    }
}
