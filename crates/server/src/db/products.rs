//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use pricebook_core::{Product, ProductId};

use super::{RepositoryError, parse_decimal};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a product and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        base_price: Decimal,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO products (name, base_price)
            VALUES (?1, ?2)
            RETURNING id
            ",
        )
        .bind(name)
        .bind(base_price.to_string())
        .fetch_one(self.pool)
        .await?;

        Ok(Product {
            id: row.try_get("id")?,
            name: name.to_owned(),
            base_price,
        })
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, name, base_price
            FROM products
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    /// List all products in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, base_price
            FROM products
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, RepositoryError> {
    let base_price: String = row.try_get("base_price")?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        base_price: parse_decimal(&base_price, "products.base_price")?,
    })
}
