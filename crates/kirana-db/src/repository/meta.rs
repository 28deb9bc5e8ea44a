//! # Shop Metadata Repository
//!
//! Key/value storage for small shop-level facts that don't deserve their
//! own table. Currently holds the dashboard revenue watermark.
//!
//! ## Keys
//! - `revenue_reset_at` - RFC 3339 timestamp; dashboard revenue counts
//!   only sales after this instant

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};

/// Key for the dashboard revenue watermark.
const REVENUE_RESET_AT: &str = "revenue_reset_at";

/// Repository for shop metadata.
#[derive(Debug, Clone)]
pub struct MetaRepository {
    pool: SqlitePool,
}

impl MetaRepository {
    /// Creates a new MetaRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MetaRepository { pool }
    }

    /// Gets a raw value by key.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM shop_meta WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Sets a value, inserting or replacing.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shop_meta (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a key. Missing keys are not an error.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM shop_meta WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // =========================================================================
    // Typed Accessors
    // =========================================================================

    /// Reads the revenue watermark, if set.
    pub async fn revenue_reset_at(&self) -> DbResult<Option<DateTime<Utc>>> {
        match self.get(REVENUE_RESET_AT).await? {
            None => Ok(None),
            Some(raw) => raw
                .parse::<DateTime<Utc>>()
                .map(Some)
                .map_err(|e| DbError::CorruptState(format!("revenue_reset_at: {e}"))),
        }
    }

    /// Writes the revenue watermark.
    pub async fn set_revenue_reset_at(&self, at: DateTime<Utc>) -> DbResult<()> {
        self.set(REVENUE_RESET_AT, &at.to_rfc3339()).await
    }

    /// Clears the revenue watermark.
    pub async fn clear_revenue_reset_at(&self) -> DbResult<()> {
        self.delete(REVENUE_RESET_AT).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn set_get_overwrite_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.meta();

        assert_eq!(repo.get("k").await.unwrap(), None);

        repo.set("k", "v1").await.unwrap();
        assert_eq!(repo.get("k").await.unwrap(), Some("v1".to_string()));

        repo.set("k", "v2").await.unwrap();
        assert_eq!(repo.get("k").await.unwrap(), Some("v2".to_string()));

        repo.delete("k").await.unwrap();
        assert_eq!(repo.get("k").await.unwrap(), None);
        repo.delete("k").await.unwrap(); // idempotent
    }

    #[tokio::test]
    async fn revenue_watermark_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.meta();

        assert_eq!(repo.revenue_reset_at().await.unwrap(), None);

        let at = Utc::now();
        repo.set_revenue_reset_at(at).await.unwrap();
        assert_eq!(repo.revenue_reset_at().await.unwrap(), Some(at));

        repo.clear_revenue_reset_at().await.unwrap();
        assert_eq!(repo.revenue_reset_at().await.unwrap(), None);
    }
}
