//! # POS Session
//!
//! The live point-of-sale session: catalog + cart + sales ledger + shop
//! profile, with the sale committer on top.
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       complete_sale()                               │
//! │                                                                     │
//! │  cart empty? ──────────────► Err(EmptyCart)                         │
//! │       │ no                                                          │
//! │       ▼                                                             │
//! │  recompute totals from the live cart + discount + tax rate          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  revalidate EVERY line against live stock                           │
//! │       │                                                             │
//! │  any line over? ───────────► Err(InsufficientStock { all names })   │
//! │       │ no                   (no sale, no stock change, cart kept)  │
//! │       ▼                                                             │
//! │  build immutable Sale (UUID, now, snapshot lines)                   │
//! │  append to ledger ► deduct stock per line ► clear cart              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Ok(&Sale)                                                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! From the caller's view the commit is a single transaction: it either
//! fully happens or nothing changes. Stock can drift between populating
//! the cart and committing (an inventory correction in another screen),
//! which is exactly what the revalidation pass catches.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{CatalogError, CommitError, PosError};
use crate::pricing::{price_cart, Totals};
use crate::types::{DiscountSpec, NewProduct, Product, Sale, ShopProfile};
use crate::validation::validate_new_product;
use crate::StockError;

/// A live POS session for one shop.
///
/// Plain synchronous state; persistence wraps it from the outside.
#[derive(Debug, Clone)]
pub struct PosSession {
    profile: ShopProfile,
    catalog: Catalog,
    cart: Cart,
    sales: Vec<Sale>,
    revenue_reset_at: Option<DateTime<Utc>>,
}

impl PosSession {
    /// Creates a fresh session with an empty catalog and ledger.
    pub fn new(profile: ShopProfile) -> Self {
        Self {
            profile,
            catalog: Catalog::new(),
            cart: Cart::new(),
            sales: Vec::new(),
            revenue_reset_at: None,
        }
    }

    /// Restores a session from persisted state. The cart always starts
    /// empty; in-progress carts are not persisted.
    pub fn from_state(
        profile: ShopProfile,
        products: Vec<Product>,
        sales: Vec<Sale>,
        revenue_reset_at: Option<DateTime<Utc>>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            profile,
            catalog: Catalog::from_products(products)?,
            cart: Cart::new(),
            sales,
            revenue_reset_at,
        })
    }

    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Validates and adds a product to the catalog.
    pub fn add_product(&mut self, input: NewProduct) -> Result<&Product, PosError> {
        validate_new_product(&input)?;
        Ok(self.catalog.add(input)?)
    }

    /// Validates and updates an existing product.
    ///
    /// Past sales keep their snapshots; only the live catalog changes.
    pub fn update_product(&mut self, product: Product) -> Result<(), PosError> {
        validate_new_product(&NewProduct {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            stock: product.stock,
            low_stock_threshold: product.low_stock_threshold,
            expiry_date: product.expiry_date,
            barcode: product.barcode.clone(),
        })?;
        Ok(self.catalog.update(product)?)
    }

    /// Removes a product from the catalog. Any cart line for it is
    /// dropped too; sale history is untouched.
    pub fn remove_product(&mut self, id: &str) -> Option<Product> {
        let removed = self.catalog.remove(id);
        if removed.is_some() {
            self.cart.remove_line(id);
        }
        removed
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of a product to the cart by id.
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<(), PosError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| CatalogError::NotFound {
                reference: product_id.to_string(),
            })?
            .clone();
        Ok(self.cart.add_product(&product)?)
    }

    /// Handles a barcode scanner read.
    ///
    /// ## Behavior
    /// - Blank input (scanner noise) is a silent no-op
    /// - Unknown barcode: [`CatalogError::NotFound`] so the UI can offer
    ///   "add new product"
    /// - `stock <= 0`: [`StockError::OutOfStock`]
    /// - Cart already holds the full stock:
    ///   [`StockError::MaxStockInCartReached`]
    /// - Otherwise adds one unit like [`Self::add_to_cart`]
    pub fn scan_barcode(&mut self, input: &str) -> Result<(), PosError> {
        let barcode = input.trim();
        if barcode.is_empty() {
            return Ok(());
        }

        let product = self
            .catalog
            .get_by_barcode(barcode)
            .ok_or_else(|| CatalogError::NotFound {
                reference: barcode.to_string(),
            })?
            .clone();

        if product.stock <= 0 {
            return Err(StockError::OutOfStock { name: product.name }.into());
        }
        if self.cart.quantity_of(&product.id) >= product.stock {
            return Err(StockError::MaxStockInCartReached {
                name: product.name,
                available: product.stock,
            }
            .into());
        }

        Ok(self.cart.add_product(&product)?)
    }

    /// Sets a cart line's quantity. A product id with no catalog entry is
    /// a silent no-op, matching the removed-line UI race.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), PosError> {
        let Some(product) = self.catalog.get(product_id).cloned() else {
            return Ok(());
        };
        Ok(self.cart.update_quantity(&product, quantity)?)
    }

    /// Removes a product's cart line.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove_line(product_id);
    }

    /// Sets or clears the cart discount.
    pub fn set_discount(&mut self, discount: Option<DiscountSpec>) {
        self.cart.set_discount(discount);
    }

    /// Abandons the cart: lines and discount.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// The live totals for the current cart.
    pub fn totals(&self) -> Totals {
        price_cart(
            self.cart.items(),
            self.cart.discount(),
            self.profile.tax_rate_percent,
        )
    }

    // =========================================================================
    // Sale Committer
    // =========================================================================

    /// Commits the cart as an immutable sale.
    ///
    /// All-or-nothing: on any error no `Sale` exists, stock is untouched
    /// and the cart is kept so the operator can adjust and resubmit.
    pub fn complete_sale(&mut self) -> Result<&Sale, CommitError> {
        if self.cart.is_empty() {
            return Err(CommitError::EmptyCart);
        }

        let totals = self.totals();

        // Revalidate against live stock; collect every offender so the
        // operator sees the whole problem at once.
        let offenders: Vec<String> = self
            .cart
            .items()
            .iter()
            .filter(|line| {
                self.catalog
                    .get(&line.product_id)
                    .map_or(true, |p| p.stock < line.quantity)
            })
            .map(|line| line.name.clone())
            .collect();
        if !offenders.is_empty() {
            return Err(CommitError::InsufficientStock {
                product_names: offenders,
            });
        }

        let discount = self.cart.discount();
        let applied = totals.discount_amount > 0.0;
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            items: self.cart.items().to_vec(),
            subtotal: totals.subtotal,
            discount_amount: applied.then_some(totals.discount_amount),
            discount_type: applied.then(|| discount.map(|d| d.kind)).flatten(),
            discount_value: applied.then(|| discount.map(|d| d.value)).flatten(),
            tax_amount: totals.tax_amount,
            total: totals.total,
            user_id: self.profile.user_id.clone(),
        };

        for line in sale.items.iter() {
            self.catalog.deduct_stock(&line.product_id, line.quantity);
        }
        self.sales.push(sale);
        self.cart.clear();

        Ok(self.sales.last().expect("sale just pushed"))
    }

    // =========================================================================
    // Administrative Operations
    // =========================================================================

    /// Deletes the entire sales ledger and the revenue watermark.
    /// All-or-nothing; product stock stays as it is.
    pub fn clear_sales_data(&mut self) {
        self.sales.clear();
        self.revenue_reset_at = None;
    }

    /// Marks "now" as the revenue watermark: dashboard revenue counts
    /// only sales committed after this instant. History stays intact.
    pub fn reset_dashboard_revenue(&mut self) {
        self.revenue_reset_at = Some(Utc::now());
    }

    /// The current revenue watermark, if one has been set.
    pub fn revenue_reset_at(&self) -> Option<DateTime<Utc>> {
        self.revenue_reset_at
    }

    /// Sum of sale totals after the watermark (all sales when unset).
    pub fn revenue_since_reset(&self) -> f64 {
        self.sales
            .iter()
            .filter(|s| self.revenue_reset_at.map_or(true, |reset| s.date > reset))
            .map(|s| s.total)
            .sum()
    }

    // =========================================================================
    // Read Surface
    // =========================================================================

    /// All catalog products in insertion order.
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    /// The sales ledger, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The shop profile this session runs under.
    pub fn profile(&self) -> &ShopProfile {
        &self.profile
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

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

    fn session_with(products: Vec<NewProduct>) -> PosSession {
        let mut session = PosSession::new(profile());
        for p in products {
            session.add_product(p).unwrap();
        }
        session
    }

    #[test]
    fn add_product_runs_validation() {
        let mut session = PosSession::new(profile());
        let err = session
            .add_product(input("Bad Barcode", 10.0, 5, "123"))
            .unwrap_err();
        assert!(matches!(err, PosError::Validation(_)));
        assert!(session.products().is_empty());
    }

    #[test]
    fn happy_path_sale() {
        // Scenario: 2 × ₹50 + 1 × ₹20, 10% discount, 5% tax.
        let mut session = session_with(vec![
            input("Item A", 50.0, 10, "11111111"),
            input("Item B", 20.0, 10, "22222222"),
        ]);
        let a = session.products()[0].id.clone();
        let b = session.products()[1].id.clone();

        session.add_to_cart(&a).unwrap();
        session.add_to_cart(&a).unwrap();
        session.add_to_cart(&b).unwrap();
        session.set_discount(Some(DiscountSpec::percentage(10.0)));

        let sale = session.complete_sale().unwrap().clone();

        assert!((sale.subtotal - 120.0).abs() < EPS);
        assert_eq!(sale.discount_amount, Some(12.0));
        assert_eq!(sale.discount_type, Some(crate::DiscountType::Percentage));
        assert_eq!(sale.discount_value, Some(10.0));
        assert!((sale.tax_amount - 5.4).abs() < EPS);
        assert!((sale.total - 113.4).abs() < EPS);
        assert_eq!(sale.user_id, "shop-1");

        // Stock deducted exactly, cart cleared, ledger grew.
        assert_eq!(session.products()[0].stock, 8);
        assert_eq!(session.products()[1].stock, 9);
        assert!(session.cart().is_empty());
        assert_eq!(session.cart().discount(), None);
        assert_eq!(session.sales().len(), 1);
    }

    #[test]
    fn sale_without_discount_leaves_fields_absent() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        let a = session.products()[0].id.clone();
        session.add_to_cart(&a).unwrap();

        let sale = session.complete_sale().unwrap();
        assert_eq!(sale.discount_amount, None);
        assert_eq!(sale.discount_type, None);
        assert_eq!(sale.discount_value, None);
    }

    #[test]
    fn empty_cart_cannot_commit() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        assert_eq!(session.complete_sale().unwrap_err(), CommitError::EmptyCart);
        assert!(session.sales().is_empty());
    }

    #[test]
    fn commit_revalidates_live_stock_and_reports_all_offenders() {
        let mut session = session_with(vec![
            input("Item A", 50.0, 5, ""),
            input("Item B", 20.0, 5, ""),
            input("Item C", 10.0, 5, ""),
        ]);
        let ids: Vec<String> = session.products().iter().map(|p| p.id.clone()).collect();

        for id in &ids {
            session.add_to_cart(id).unwrap();
            session.add_to_cart(id).unwrap();
        }

        // Stock drifts under the cart: A and C drop below the carted 2.
        for (idx, new_stock) in [(0usize, 1i64), (2usize, 0i64)] {
            let mut p = session.products()[idx].clone();
            p.stock = new_stock;
            session.update_product(p).unwrap();
        }

        let err = session.complete_sale().unwrap_err();
        assert_eq!(
            err,
            CommitError::InsufficientStock {
                product_names: vec!["Item A".to_string(), "Item C".to_string()],
            }
        );

        // Nothing applied: no sale, stock untouched, cart kept.
        assert!(session.sales().is_empty());
        assert_eq!(session.products()[1].stock, 5);
        assert_eq!(session.cart().items().len(), 3);
    }

    #[test]
    fn scan_barcode_paths() {
        let mut session = session_with(vec![
            input("Scanned", 40.0, 2, "89012345"),
            input("Empty Shelf", 25.0, 0, "89099999"),
        ]);

        // Blank scanner noise: silent no-op.
        session.scan_barcode("   ").unwrap();
        assert!(session.cart().is_empty());

        // Unknown barcode.
        let err = session.scan_barcode("70000000").unwrap_err();
        assert!(matches!(err, PosError::Catalog(CatalogError::NotFound { .. })));

        // Out of stock.
        let err = session.scan_barcode("89099999").unwrap_err();
        assert!(matches!(
            err,
            PosError::Stock(StockError::OutOfStock { .. })
        ));

        // Two scans fill the cart to the full stock of 2; the third is
        // the cart-full signal.
        session.scan_barcode("89012345").unwrap();
        session.scan_barcode(" 89012345 ").unwrap();
        let err = session.scan_barcode("89012345").unwrap_err();
        assert_eq!(
            err,
            PosError::Stock(StockError::MaxStockInCartReached {
                name: "Scanned".to_string(),
                available: 2,
            })
        );
        let scanned_id = session.products()[0].id.clone();
        assert_eq!(session.cart().quantity_of(&scanned_id), 2);
    }

    #[test]
    fn update_quantity_unknown_product_is_no_op() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        session.update_quantity("no-such-id", 5).unwrap();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn editing_product_after_sale_leaves_snapshot_intact() {
        let mut session = session_with(vec![input("Original Name", 60.0, 10, "")]);
        let id = session.products()[0].id.clone();
        session.add_to_cart(&id).unwrap();
        session.complete_sale().unwrap();

        let mut edited = session.products()[0].clone();
        edited.name = "Renamed".to_string();
        edited.price = 999.0;
        session.update_product(edited).unwrap();

        let sale_line = &session.sales()[0].items[0];
        assert_eq!(sale_line.name, "Original Name");
        assert_eq!(sale_line.price, 60.0);
    }

    #[test]
    fn remove_product_drops_its_cart_line() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        let id = session.products()[0].id.clone();
        session.add_to_cart(&id).unwrap();

        session.remove_product(&id).unwrap();
        assert!(session.cart().is_empty());

        // With the product gone, the pending quantity event is a no-op.
        session.update_quantity(&id, 4).unwrap();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn clear_sales_and_revenue_watermark() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        let id = session.products()[0].id.clone();

        session.add_to_cart(&id).unwrap();
        session.complete_sale().unwrap();
        assert!(session.revenue_since_reset() > 0.0);

        session.reset_dashboard_revenue();
        assert!(session.revenue_reset_at().is_some());
        // History intact, but nothing counts toward revenue yet.
        assert_eq!(session.sales().len(), 1);
        assert_eq!(session.revenue_since_reset(), 0.0);

        session.add_to_cart(&id).unwrap();
        session.complete_sale().unwrap();
        assert!((session.revenue_since_reset() - 52.5).abs() < EPS);

        session.clear_sales_data();
        assert!(session.sales().is_empty());
        assert!(session.revenue_reset_at().is_none());
        // Stock is an inventory fact, not a sales record.
        assert_eq!(session.products()[0].stock, 8);
    }

    #[test]
    fn stock_conservation_across_sales() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "")]);
        let id = session.products()[0].id.clone();

        for _ in 0..3 {
            session.add_to_cart(&id).unwrap();
            session.add_to_cart(&id).unwrap();
            session.complete_sale().unwrap();
        }

        let sold: i64 = session
            .sales()
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|l| l.quantity)
            .sum();
        assert_eq!(sold, 6);
        assert_eq!(session.products()[0].stock, 10 - sold);
    }

    #[test]
    fn from_state_restores_catalog_and_ledger() {
        let mut session = session_with(vec![input("Item A", 50.0, 10, "11111111")]);
        let id = session.products()[0].id.clone();
        session.add_to_cart(&id).unwrap();
        session.complete_sale().unwrap();

        let restored = PosSession::from_state(
            profile(),
            session.products().to_vec(),
            session.sales().to_vec(),
            session.revenue_reset_at(),
        )
        .unwrap();

        assert_eq!(restored.products(), session.products());
        assert_eq!(restored.sales(), session.sales());
        assert!(restored.cart().is_empty());
    }
}
