//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐       │
//! │  │    Product     │   │      Sale      │   │  SaleLineItem  │       │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │       │
//! │  │  id (UUID)     │   │  id (UUID)     │   │  product_id    │       │
//! │  │  barcode       │   │  date          │   │  name (frozen) │       │
//! │  │  price, stock  │   │  totals        │   │  price (frozen)│       │
//! │  │  expiry_date   │   │  items[]       │   │  quantity      │       │
//! │  └────────────────┘   └────────────────┘   └────────────────┘       │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐                            │
//! │  │  DiscountSpec  │   │  ShopProfile   │                            │
//! │  │  ────────────  │   │  ────────────  │                            │
//! │  │  value         │   │  user_id       │                            │
//! │  │  Percentage |  │   │  shop_name     │                            │
//! │  │  Fixed         │   │  tax_rate_%    │                            │
//! │  └────────────────┘   └────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `SaleLineItem` denormalizes `name` and `price` at add-time. A completed
//! `Sale` therefore never references live catalog data: editing or deleting
//! a product afterwards cannot retroactively alter sales history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product in the shop's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the catalog.
    pub id: String,

    /// Display name, unique across the catalog (case-insensitive).
    pub name: String,

    /// Free-form category (Dairy, Bakery, ...), used for dashboards.
    pub category: String,

    /// Unit price in the shop's currency. Non-negative.
    pub price: f64,

    /// Units currently on the shelf. The sale committer is the only core
    /// code that decrements this.
    pub stock: i64,

    /// Dashboard alert threshold: the product is "low" at or below this.
    pub low_stock_threshold: i64,

    /// Best-before date, used by the expiry dashboard.
    pub expiry_date: NaiveDate,

    /// Scanner barcode: 8-13 ASCII digits, unique across the catalog.
    /// May be empty for products sold by name lookup only.
    pub barcode: String,
}

impl Product {
    /// Whether the stock level has fallen to the alert threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    /// Whether the product expires on or before the given date.
    #[inline]
    pub fn expires_on_or_before(&self, date: NaiveDate) -> bool {
        self.expiry_date <= date
    }
}

/// Input for creating a product: everything except the id, which the
/// catalog assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub low_stock_threshold: i64,
    pub expiry_date: NaiveDate,
    pub barcode: String,
}

// =============================================================================
// Discount
// =============================================================================

/// How an operator-entered discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Value is a percentage of the subtotal.
    Percentage,
    /// Value is a flat currency amount.
    Fixed,
}

/// An operator-entered discount for the current cart.
///
/// The value is stored exactly as entered; clamping to `[0, subtotal]`
/// happens in the pricing calculator, never here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountSpec {
    /// Non-negative number as typed by the operator.
    pub value: f64,
    /// Percentage or fixed amount.
    pub kind: DiscountType,
}

impl DiscountSpec {
    /// Convenience constructor for a percentage discount.
    pub fn percentage(value: f64) -> Self {
        DiscountSpec {
            value,
            kind: DiscountType::Percentage,
        }
    }

    /// Convenience constructor for a fixed-amount discount.
    pub fn fixed(value: f64) -> Self {
        DiscountSpec {
            value,
            kind: DiscountType::Fixed,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One product-quantity pairing within a cart or completed sale.
///
/// `name` and `price` are frozen copies taken when the line was created,
/// so the sale history survives later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub product_id: String,
    /// Product name at add-time (frozen).
    pub name: String,
    /// Units sold. Always positive inside a cart or sale.
    pub quantity: i64,
    /// Unit price at add-time (frozen).
    pub price: f64,
}

impl SaleLineItem {
    /// Creates a fresh quantity-1 line from a product, freezing name and
    /// price.
    pub fn from_product(product: &Product) -> Self {
        SaleLineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity: 1,
            price: product.price,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A completed sale. Immutable once created; deletable only via the bulk
/// clear-all-sales operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Commit timestamp.
    pub date: DateTime<Utc>,

    /// Snapshot copies of the cart lines. Never live references.
    pub items: Vec<SaleLineItem>,

    /// Sum of line totals before discount and tax.
    pub subtotal: f64,

    /// Clamped discount actually applied; absent when no discount was in
    /// effect.
    pub discount_amount: Option<f64>,

    /// How the operator entered the discount (present iff a discount
    /// applied).
    pub discount_type: Option<DiscountType>,

    /// The raw operator-entered discount value (present iff a discount
    /// applied).
    pub discount_value: Option<f64>,

    /// Tax charged on the discounted subtotal.
    pub tax_amount: f64,

    /// Grand total: subtotal - discount + tax.
    pub total: f64,

    /// Owning shop/session.
    pub user_id: String,
}

// =============================================================================
// Shop Profile
// =============================================================================

/// Per-shop configuration passed into the session explicitly.
///
/// The original system kept this in ambient context-provider state; here
/// it is plain data handed to [`crate::PosSession::new`] so the core has
/// no global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopProfile {
    /// Owning shop/session key; stamped onto every sale.
    pub user_id: String,

    /// Display name, used by receipt renderers downstream.
    pub shop_name: String,

    /// Tax rate as a percentage (e.g. 5.0 for 5%).
    pub tax_rate_percent: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
