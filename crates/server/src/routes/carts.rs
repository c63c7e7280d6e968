//! Cart route handlers.
//!
//! Calculation is read-only; saving persists the freshly calculated cart and
//! returns it with its assigned identity and timestamp.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use pricebook_core::{CalculatedCart, CartId, CartLineInput, CartStore, SavedCart};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart calculation/save request body.
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub items: Vec<CartLineInput>,
}

/// Price a cart without persisting it.
///
/// POST /cart/calculate
///
/// # Errors
///
/// Returns `AppError::Pricing` when a referenced product does not exist or a
/// quantity is invalid (422), or when product resolution fails (500).
pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CartRequest>,
) -> Result<Json<CalculatedCart>> {
    let cart = state.engine().calculate_cart(&req.items).await?;
    Ok(Json(cart))
}

/// Price a cart and persist the result.
///
/// POST /cart/save
///
/// A save failure does not invalidate the calculation; clients may retry.
///
/// # Errors
///
/// Returns `AppError::Pricing` for calculation failures and
/// `AppError::Gateway` if persisting the calculated cart fails.
pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<CartRequest>,
) -> Result<(StatusCode, Json<SavedCart>)> {
    let cart = state.engine().calculate_cart(&req.items).await?;
    let (id, created_at) = state.gateway().save_cart(&cart).await?;

    Ok((
        StatusCode::CREATED,
        Json(SavedCart {
            id,
            created_at,
            cart,
        }),
    ))
}

/// Fetch a previously saved cart.
///
/// GET /cart/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no cart has the given ID.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CartId>,
) -> Result<Json<SavedCart>> {
    state
        .gateway()
        .saved_cart(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("cart {id}")))
}
