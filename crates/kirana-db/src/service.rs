//! # Inventory Service
//!
//! Ties a [`PosSession`] to write-through SQLite persistence.
//!
//! ## Write-Through Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      InventoryService                               │
//! │                                                                     │
//! │  open(db, profile)                                                  │
//! │    └── load products + sales + watermark → PosSession::from_state   │
//! │                                                                     │
//! │  mutation (e.g. complete_sale)                                      │
//! │    ├── 1. apply to the in-memory session  ← AUTHORITATIVE           │
//! │    │      └── core error? return it, nothing persisted              │
//! │    └── 2. mirror to SQLite                ← BEST-EFFORT             │
//! │           └── db error? tracing::warn!, operation still succeeds    │
//! │                                                                     │
//! │  The session is the source of truth for the running process; the   │
//! │  database is the copy that survives restarts. A persistence        │
//! │  failure degrades durability, not correctness of the live session. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Carts are deliberately not persisted: an in-progress cart dies with
//! the process, matching how an abandoned physical basket behaves.

use tracing::{info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use kirana_core::error::{CommitError, PosError};
use kirana_core::pricing::Totals;
use kirana_core::types::{DiscountSpec, NewProduct, Product, Sale, ShopProfile};
use kirana_core::{Cart, PosSession};

/// A POS session backed by write-through SQLite persistence.
#[derive(Debug)]
pub struct InventoryService {
    db: Database,
    session: PosSession,
}

impl InventoryService {
    /// Opens a service: loads all persisted state into a fresh session.
    ///
    /// Unlike mutations, the load is NOT best-effort: starting from a
    /// partial catalog would silently drop data, so open fails loudly.
    pub async fn open(db: Database, profile: ShopProfile) -> DbResult<Self> {
        let products = db.products().list_all().await?;
        let sales = db.sales().list_all().await?;
        let revenue_reset_at = db.meta().revenue_reset_at().await?;

        info!(
            products = products.len(),
            sales = sales.len(),
            "Loaded persisted state"
        );

        let session = PosSession::from_state(profile, products, sales, revenue_reset_at)
            .map_err(|e| crate::error::DbError::CorruptState(e.to_string()))?;

        Ok(InventoryService { db, session })
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Adds a product to the catalog and mirrors it to the database.
    pub async fn add_product(&mut self, input: NewProduct) -> Result<Product, PosError> {
        let product = self.session.add_product(input)?.clone();

        if let Err(e) = self.db.products().insert(&product).await {
            warn!(id = %product.id, error = %e, "Failed to persist product insert");
        }

        Ok(product)
    }

    /// Updates a product and mirrors the change.
    pub async fn update_product(&mut self, product: Product) -> Result<(), PosError> {
        self.session.update_product(product.clone())?;

        if let Err(e) = self.db.products().update(&product).await {
            warn!(id = %product.id, error = %e, "Failed to persist product update");
        }

        Ok(())
    }

    /// Removes a product and mirrors the delete.
    pub async fn remove_product(&mut self, id: &str) -> Option<Product> {
        let removed = self.session.remove_product(id)?;

        if let Err(e) = self.db.products().delete(id).await {
            warn!(id = %id, error = %e, "Failed to persist product delete");
        }

        Some(removed)
    }

    // =========================================================================
    // Cart Operations (memory only - carts are not persisted)
    // =========================================================================

    /// Adds one unit of a product to the cart.
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<(), PosError> {
        self.session.add_to_cart(product_id)
    }

    /// Handles a barcode scanner read.
    pub fn scan_barcode(&mut self, input: &str) -> Result<(), PosError> {
        self.session.scan_barcode(input)
    }

    /// Sets a cart line's quantity.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), PosError> {
        self.session.update_quantity(product_id, quantity)
    }

    /// Removes a product's cart line.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.session.remove_from_cart(product_id);
    }

    /// Sets or clears the cart discount.
    pub fn set_discount(&mut self, discount: Option<DiscountSpec>) {
        self.session.set_discount(discount);
    }

    /// Abandons the cart.
    pub fn clear_cart(&mut self) {
        self.session.clear_cart();
    }

    /// The live totals for the current cart.
    pub fn totals(&self) -> Totals {
        self.session.totals()
    }

    // =========================================================================
    // Sale Committer
    // =========================================================================

    /// Commits the cart as a sale, then mirrors the sale record and its
    /// stock decrements to the database in one SQL transaction.
    ///
    /// The in-memory commit is authoritative: a persistence failure is
    /// logged but the sale stands (the conditional decrement cannot
    /// conflict here because memory and database stock move in lockstep
    /// within one service).
    pub async fn complete_sale(&mut self) -> Result<Sale, CommitError> {
        let sale = self.session.complete_sale()?.clone();

        if let Err(e) = self.db.sales().record_sale(&sale).await {
            warn!(id = %sale.id, error = %e, "Failed to persist sale");
        }

        Ok(sale)
    }

    // =========================================================================
    // Administrative Operations
    // =========================================================================

    /// Deletes the entire sales ledger and the revenue watermark.
    pub async fn clear_sales_data(&mut self) {
        self.session.clear_sales_data();

        if let Err(e) = self.db.sales().clear_all().await {
            warn!(error = %e, "Failed to persist sales clear");
        }
        if let Err(e) = self.db.meta().clear_revenue_reset_at().await {
            warn!(error = %e, "Failed to clear persisted revenue watermark");
        }
    }

    /// Marks "now" as the dashboard revenue watermark.
    pub async fn reset_dashboard_revenue(&mut self) {
        self.session.reset_dashboard_revenue();

        if let Some(at) = self.session.revenue_reset_at() {
            if let Err(e) = self.db.meta().set_revenue_reset_at(at).await {
                warn!(error = %e, "Failed to persist revenue watermark");
            }
        }
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// All catalog products in insertion order.
    pub fn products(&self) -> &[Product] {
        self.session.products()
    }

    /// The sales ledger, oldest first.
    pub fn sales(&self) -> &[Sale] {
        self.session.sales()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        self.session.cart()
    }

    /// Sum of sale totals after the watermark.
    pub fn revenue_since_reset(&self) -> f64 {
        self.session.revenue_since_reset()
    }

    /// The underlying session, for read-only inspection.
    pub fn session(&self) -> &PosSession {
        &self.session
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use chrono::NaiveDate;
    use kirana_core::DiscountType;

    fn profile() -> ShopProfile {
        ShopProfile {
            user_id: "shop-1".to_string(),
            shop_name: "Sharma General Store".to_string(),
            tax_rate_percent: 5.0,
        }
    }

    fn input(name: &str, price: f64, stock: i64, barcode: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Grocery".to_string(),
            price,
            stock,
            low_stock_threshold: 5,
            expiry_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            barcode: barcode.to_string(),
        }
    }

    async fn open_service() -> InventoryService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryService::open(db, profile()).await.unwrap()
    }

    #[tokio::test]
    async fn sale_flow_writes_through() {
        let mut svc = open_service().await;

        let a = svc.add_product(input("Item A", 50.0, 10, "11111111")).await.unwrap();
        let b = svc.add_product(input("Item B", 20.0, 10, "")).await.unwrap();

        svc.add_to_cart(&a.id).unwrap();
        svc.add_to_cart(&a.id).unwrap();
        svc.add_to_cart(&b.id).unwrap();
        svc.set_discount(Some(DiscountSpec::percentage(10.0)));

        let sale = svc.complete_sale().await.unwrap();
        assert!((sale.total - 113.4).abs() < 1e-9);
        assert_eq!(sale.discount_type, Some(DiscountType::Percentage));

        // Database mirrors the commit.
        let db = svc.db.clone();
        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert_eq!(db.products().get_by_id(&a.id).await.unwrap().unwrap().stock, 8);
    }

    #[tokio::test]
    async fn state_survives_reopen() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut svc = InventoryService::open(db.clone(), profile()).await.unwrap();

        let a = svc.add_product(input("Item A", 50.0, 10, "11111111")).await.unwrap();
        svc.add_to_cart(&a.id).unwrap();
        svc.complete_sale().await.unwrap();
        svc.reset_dashboard_revenue().await;

        // Same database, fresh service: everything but the cart comes back.
        let reopened = InventoryService::open(db, profile()).await.unwrap();
        assert_eq!(reopened.products().len(), 1);
        assert_eq!(reopened.products()[0].stock, 9);
        assert_eq!(reopened.sales().len(), 1);
        assert!(reopened.session().revenue_reset_at().is_some());
        assert!(reopened.cart().is_empty());
    }

    #[tokio::test]
    async fn core_errors_do_not_touch_the_database() {
        let mut svc = open_service().await;
        svc.add_product(input("Item A", 50.0, 10, "")).await.unwrap();

        let err = svc.add_product(input("item a", 60.0, 5, "")).await.unwrap_err();
        assert!(matches!(err, PosError::Catalog(_)));

        assert_eq!(svc.db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_sales_data_clears_ledger_and_watermark() {
        let mut svc = open_service().await;
        let a = svc.add_product(input("Item A", 50.0, 10, "")).await.unwrap();

        svc.add_to_cart(&a.id).unwrap();
        svc.complete_sale().await.unwrap();
        svc.reset_dashboard_revenue().await;

        svc.clear_sales_data().await;

        assert!(svc.sales().is_empty());
        assert_eq!(svc.db.sales().count().await.unwrap(), 0);
        assert_eq!(svc.db.meta().revenue_reset_at().await.unwrap(), None);
        // Stock keeps reflecting what was sold.
        assert_eq!(svc.products()[0].stock, 9);
    }
}
