//! Cart types: raw inputs and priced results.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartId, ProductId, PromotionId};

/// One (product, quantity) entry in a cart before pricing.
///
/// Ephemeral: constructed per request and consumed by the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineInput {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A cart line after pricing.
///
/// Invariants: `effective_unit_price = original_unit_price - per-unit discount`
/// (or the base price when no promotion applied), and
/// `line_total = effective_unit_price * quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedLine {
    pub product_id: ProductId,
    /// Product name snapshot at calculation time.
    pub product_name: String,
    pub quantity: i64,
    pub original_unit_price: Decimal,
    /// Per-unit price after any single applicable discount.
    pub effective_unit_price: Decimal,
    /// `effective_unit_price * quantity`.
    pub line_total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub applied_promotion_id: Option<PromotionId>,
    /// Total discount for this line: per-unit discount * quantity.
    pub discount_amount: Decimal,
}

/// A fully priced cart.
///
/// Lines keep their input order. Invariant:
/// `final_total = subtotal - total_discount` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedCart {
    pub lines: Vec<CalculatedLine>,
    /// Sum of `original_unit_price * quantity` across lines.
    pub subtotal: Decimal,
    /// Sum of line discount amounts.
    pub total_discount: Decimal,
    pub final_total: Decimal,
}

impl CalculatedCart {
    /// A priced cart with no lines and zero totals.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            subtotal: Decimal::ZERO,
            total_discount: Decimal::ZERO,
            final_total: Decimal::ZERO,
        }
    }
}

/// A calculated cart persisted with an assigned identity and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCart {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub cart: CalculatedCart,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_cart_has_zero_totals() {
        let cart = CalculatedCart::empty();
        assert!(cart.lines.is_empty());
        assert_eq!(cart.subtotal, Decimal::ZERO);
        assert_eq!(cart.total_discount, Decimal::ZERO);
        assert_eq!(cart.final_total, Decimal::ZERO);
    }

    #[test]
    fn applied_promotion_is_omitted_from_json_when_absent() {
        let line = CalculatedLine {
            product_id: ProductId::new(1),
            product_name: "Widget".to_owned(),
            quantity: 1,
            original_unit_price: dec!(10.00),
            effective_unit_price: dec!(10.00),
            line_total: dec!(10.00),
            applied_promotion_id: None,
            discount_amount: Decimal::ZERO,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("applied_promotion_id").is_none());
    }

    #[test]
    fn saved_cart_flattens_the_calculated_cart() {
        let saved = SavedCart {
            id: CartId::new(5),
            created_at: Utc::now(),
            cart: CalculatedCart::empty(),
        };
        let json = serde_json::to_value(&saved).unwrap();
        assert!(json.get("lines").is_some());
        assert!(json.get("subtotal").is_some());
        assert!(json.get("cart").is_none());
    }

    #[test]
    fn calculated_cart_round_trips_through_json() {
        let cart = CalculatedCart {
            lines: vec![CalculatedLine {
                product_id: ProductId::new(2),
                product_name: "Gadget".to_owned(),
                quantity: 3,
                original_unit_price: dec!(5.50),
                effective_unit_price: dec!(4.95),
                line_total: dec!(14.85),
                applied_promotion_id: Some(PromotionId::new(9)),
                discount_amount: dec!(1.65),
            }],
            subtotal: dec!(16.50),
            total_discount: dec!(1.65),
            final_total: dec!(14.85),
        };
        let json = serde_json::to_string(&cart).unwrap();
        let back: CalculatedCart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
