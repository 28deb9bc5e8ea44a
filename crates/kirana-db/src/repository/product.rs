//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD over the `products` table
//! - Conditional stock deduction for sale commits
//!
//! ## Conditional Stock Deduction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │            UPDATE products SET stock = stock - ?                    │
//! │            WHERE id = ? AND stock >= ?                              │
//! │                                                                     │
//! │  rows_affected = 1  → deduction applied                             │
//! │  rows_affected = 0  → not enough stock (or unknown id)              │
//! │                       → DbError::StockConflict                      │
//! │                                                                     │
//! │  The guard makes oversell impossible at the storage level even     │
//! │  if the in-memory revalidation raced a concurrent write.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kirana_core::Product;

/// Database row shape for `products`.
///
/// Kept separate from the domain type so the SQL schema can evolve
/// without leaking into kirana-core.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    category: String,
    price: f64,
    stock: i64,
    low_stock_threshold: i64,
    expiry_date: NaiveDate,
    barcode: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            stock: row.stock,
            low_stock_threshold: row.low_stock_threshold,
            expiry_date: row.expiry_date,
            barcode: row.barcode,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let products = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products in insertion order (rowid).
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, stock,
                   low_stock_threshold, expiry_date, barcode
            FROM products
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price, stock,
                   low_stock_threshold, expiry_date, barcode
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Inserts a product.
    ///
    /// The NOCASE name index and the partial barcode index surface as
    /// [`DbError::UniqueViolation`] on duplicates.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category, price, stock,
                low_stock_threshold, expiry_date, barcode
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.low_stock_threshold)
        .bind(product.expiry_date)
        .bind(&product.barcode)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a product wholesale.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                price = ?4,
                stock = ?5,
                low_stock_threshold = ?6,
                expiry_date = ?7,
                barcode = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.low_stock_threshold)
        .bind(product.expiry_date)
        .bind(&product.barcode)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product. Sale item snapshots are untouched.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deducts stock with the conditional guard.
    ///
    /// ## Returns
    /// [`DbError::StockConflict`] when less than `quantity` is in stock
    /// (or the id is unknown); the row is then unchanged.
    pub async fn deduct_stock(&self, id: &str, quantity: i64) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET stock = stock - ?2
            WHERE id = ?1 AND stock >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::StockConflict {
                product_id: id.to_string(),
                requested: quantity,
            });
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
