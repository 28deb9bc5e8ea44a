//! # Sale Repository
//!
//! Database operations for sales and their item snapshots.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       record_sale()                                 │
//! │                                                                     │
//! │  BEGIN TRANSACTION                                                  │
//! │    INSERT INTO sales (...)                                          │
//! │    for each line:                                                   │
//! │      INSERT INTO sale_items (...)                                   │
//! │      UPDATE products SET stock = stock - qty                        │
//! │        WHERE id = ? AND stock >= qty                                │
//! │        └── 0 rows? → ROLLBACK, DbError::StockConflict               │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Either the sale, its items AND every stock decrement land, or     │
//! │  none of them do.                                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `sale_items` stores name and unit price copies taken at sale time, so
//! sales history is immune to later product edits and deletes (there is
//! deliberately no FK from `sale_items.product_id` to `products`).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kirana_core::{DiscountType, Sale, SaleLineItem};

/// Database row shape for `sales`.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    date: DateTime<Utc>,
    subtotal: f64,
    discount_amount: Option<f64>,
    discount_type: Option<DiscountType>,
    discount_value: Option<f64>,
    tax_amount: f64,
    total: f64,
    user_id: String,
}

/// Database row shape for `sale_items`.
#[derive(Debug, sqlx::FromRow)]
struct SaleItemRow {
    sale_id: String,
    product_id: String,
    name: String,
    quantity: i64,
    price: f64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a completed sale: header, item snapshots and the per-line
    /// stock decrements, all in one transaction.
    ///
    /// ## Returns
    /// [`DbError::StockConflict`] when any line finds less live stock
    /// than it sells; the whole transaction then rolls back.
    pub async fn record_sale(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, total = %sale.total, items = sale.items.len(), "Recording sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, date, subtotal,
                discount_amount, discount_type, discount_value,
                tax_amount, total, user_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.date)
        .bind(sale.subtotal)
        .bind(sale.discount_amount)
        .bind(sale.discount_type)
        .bind(sale.discount_value)
        .bind(sale.tax_amount)
        .bind(sale.total)
        .bind(&sale.user_id)
        .execute(&mut *tx)
        .await?;

        for (position, item) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, position, product_id, name, quantity, price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&sale.id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;

            let result = sqlx::query(
                r#"
                UPDATE products SET stock = stock - ?2
                WHERE id = ?1 AND stock >= ?2
                "#,
            )
            .bind(&item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls everything back.
                return Err(DbError::StockConflict {
                    product_id: item.product_id.clone(),
                    requested: item.quantity,
                });
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(())
    }

    /// Lists all sales oldest first, with their items in add order.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let sale_rows: Vec<SaleRow> = sqlx::query_as(
            r#"
            SELECT id, date, subtotal,
                   discount_amount, discount_type, discount_value,
                   tax_amount, total, user_id
            FROM sales
            ORDER BY date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let item_rows: Vec<SaleItemRow> = sqlx::query_as(
            r#"
            SELECT sale_id, product_id, name, quantity, price
            FROM sale_items
            ORDER BY sale_id, position
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_sale: HashMap<String, Vec<SaleLineItem>> = HashMap::new();
        for row in item_rows {
            items_by_sale
                .entry(row.sale_id)
                .or_default()
                .push(SaleLineItem {
                    product_id: row.product_id,
                    name: row.name,
                    quantity: row.quantity,
                    price: row.price,
                });
        }

        Ok(sale_rows
            .into_iter()
            .map(|row| Sale {
                items: items_by_sale.remove(&row.id).unwrap_or_default(),
                id: row.id,
                date: row.date,
                subtotal: row.subtotal,
                discount_amount: row.discount_amount,
                discount_type: row.discount_type,
                discount_value: row.discount_value,
                tax_amount: row.tax_amount,
                total: row.total,
                user_id: row.user_id,
            })
            .collect())
    }

    /// Deletes every sale and (via FK cascade) every sale item.
    /// Product stock is an inventory fact and stays as it is.
    pub async fn clear_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sales").execute(&self.pool).await?;
        debug!(deleted = result.rows_affected(), "Cleared sales data");
        Ok(result.rows_affected())
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
