//! Promotion route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use pricebook_core::{ProductId, Promotion, PromotionKind};

use crate::db::PromotionRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create promotion request body.
///
/// `kind` is a closed enumeration; an unrecognized kind fails deserialization
/// rather than creating a promotion the engine would silently ignore.
#[derive(Debug, Deserialize)]
pub struct CreatePromotionRequest {
    pub name: String,
    pub kind: PromotionKind,
    pub value: Decimal,
    pub target_product_id: ProductId,
}

/// Create a promotion.
///
/// POST /promotions
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty name or a percentage outside
/// [0, 100].
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<Promotion>)> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("promotion name must not be empty".into()));
    }
    match req.kind {
        PromotionKind::PercentageDiscount => {
            if req.value < Decimal::ZERO || req.value > Decimal::ONE_HUNDRED {
                return Err(AppError::BadRequest(
                    "percentage value must be between 0 and 100".into(),
                ));
            }
        }
    }

    let promotion = PromotionRepository::new(state.pool())
        .create(name, req.kind, req.value, req.target_product_id)
        .await?;

    Ok((StatusCode::CREATED, Json(promotion)))
}

/// List all promotions.
///
/// GET /promotions
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Promotion>>> {
    let promotions = PromotionRepository::new(state.pool()).list().await?;
    Ok(Json(promotions))
}
