//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use pricebook_core::{Product, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create product request body.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub base_price: Decimal,
}

/// Create a product.
///
/// POST /products
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty name or negative base price.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("product name must not be empty".into()));
    }
    if req.base_price < Decimal::ZERO {
        return Err(AppError::BadRequest("base price must not be negative".into()));
    }

    let product = ProductRepository::new(state.pool())
        .create(name, req.base_price)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products.
///
/// GET /products
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Fetch a single product.
///
/// GET /products/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has the given ID.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
