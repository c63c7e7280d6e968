//! Promotion repository for database operations.

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use pricebook_core::{ProductId, Promotion, PromotionKind};

use super::{RepositoryError, parse_decimal};

/// Repository for promotion database operations.
pub struct PromotionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PromotionRepository<'a> {
    /// Create a new promotion repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a promotion and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        kind: PromotionKind,
        value: Decimal,
        target_product_id: ProductId,
    ) -> Result<Promotion, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO promotions (name, kind, value, target_product_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(kind.as_str())
        .bind(value.to_string())
        .bind(target_product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(Promotion {
            id: row.try_get("id")?,
            name: name.to_owned(),
            kind,
            value,
            target_product_id,
        })
    }

    /// List all promotions in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` for invalid stored rows.
    pub async fn list(&self) -> Result<Vec<Promotion>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, kind, value, target_product_id
            FROM promotions
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(promotion_from_row).collect()
    }

    /// Promotions targeting the given product.
    ///
    /// Ordered by ID so the pricing engine's first-match tie-break is stable
    /// across calls.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` for invalid stored rows.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Promotion>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, kind, value, target_product_id
            FROM promotions
            WHERE target_product_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(promotion_from_row).collect()
    }
}

fn promotion_from_row(row: &SqliteRow) -> Result<Promotion, RepositoryError> {
    let kind: String = row.try_get("kind")?;
    let kind = kind.parse::<PromotionKind>().map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid promotion kind in database: {e}"))
    })?;
    let value: String = row.try_get("value")?;

    Ok(Promotion {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind,
        value: parse_decimal(&value, "promotions.value")?,
        target_product_id: row.try_get("target_product_id")?,
    })
}
