//! Saved-cart repository for database operations.
//!
//! Calculated carts are persisted with their line detail as an opaque JSON
//! blob; only the totals get their own columns.

use chrono::{DateTime, Utc};
use pricebook_core::{CalculatedCart, CartId, SavedCart};
use sqlx::{Row, SqlitePool};

use super::{RepositoryError, parse_decimal};

/// Repository for saved-cart database operations.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a calculated cart, assigning its ID and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    /// Returns `RepositoryError::DataCorruption` if the lines cannot be
    /// serialized.
    pub async fn save(
        &self,
        cart: &CalculatedCart,
    ) -> Result<(CartId, DateTime<Utc>), RepositoryError> {
        let lines_json = serde_json::to_string(&cart.lines).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart lines: {e}"))
        })?;

        let created_at = Utc::now();
        let row = sqlx::query(
            r"
            INSERT INTO saved_carts (created_at, lines_json, subtotal, total_discount, final_total)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            ",
        )
        .bind(created_at)
        .bind(lines_json)
        .bind(cart.subtotal.to_string())
        .bind(cart.total_discount.to_string())
        .bind(cart.final_total.to_string())
        .fetch_one(self.pool)
        .await?;

        Ok((row.try_get("id")?, created_at))
    }

    /// Load a saved cart by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get(&self, id: CartId) -> Result<Option<SavedCart>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, created_at, lines_json, subtotal, total_discount, final_total
            FROM saved_carts
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines_json: String = row.try_get("lines_json")?;
        let lines = serde_json::from_str(&lines_json).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid cart lines in database: {e}"))
        })?;
        let subtotal: String = row.try_get("subtotal")?;
        let total_discount: String = row.try_get("total_discount")?;
        let final_total: String = row.try_get("final_total")?;

        Ok(Some(SavedCart {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            cart: CalculatedCart {
                lines,
                subtotal: parse_decimal(&subtotal, "saved_carts.subtotal")?,
                total_discount: parse_decimal(&total_discount, "saved_carts.total_discount")?,
                final_total: parse_decimal(&final_total, "saved_carts.final_total")?,
            },
        }))
    }
}
