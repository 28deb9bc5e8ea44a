//! # Error Types
//!
//! Structured failure signals for the POS core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  kirana-core errors (this file)                                     │
//! │  ├── ValidationError  - malformed operator input (form blocked)     │
//! │  ├── CatalogError     - duplicates / unknown product                │
//! │  ├── StockError       - cart mutation rejected as a no-op           │
//! │  ├── CommitError      - sale not created, stock untouched           │
//! │  └── PosError         - transparent wrapper used by the session     │
//! │                                                                     │
//! │  kirana-db errors (separate crate)                                  │
//! │  └── DbError          - persistence failures                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Every error here is recoverable at the immediate caller (the UI)
//! 2. Expected operator behavior (unknown barcode, over-scan) is a typed
//!    signal, never a panic
//! 3. Variants carry the context the UI needs (product name, available
//!    stock) so messages can be built without a second lookup

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Malformed operator input, caught before any state mutates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Barcode is present but not 8-13 characters long.
    #[error("barcode must be {min}-{max} digits, got {len}")]
    BarcodeLength { len: usize, min: usize, max: usize },

    /// Barcode contains something other than ASCII digits.
    #[error("barcode must contain only digits")]
    BarcodeNotNumeric,

    /// A numeric field that must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog CRUD failures.
///
/// Duplicate checks run on trimmed values; the name comparison is
/// case-insensitive (the original system treats "Milk" and "milk" as the
/// same product).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Another product already uses this name (case-insensitive).
    #[error("a product named '{name}' already exists")]
    DuplicateName { name: String },

    /// Another product already uses this barcode.
    #[error("barcode '{barcode}' is already assigned to another product")]
    DuplicateBarcode { barcode: String },

    /// No product matches the given id or barcode.
    #[error("product not found: {reference}")]
    NotFound { reference: String },
}

// =============================================================================
// Stock Error
// =============================================================================

/// A cart mutation rejected because of stock limits.
///
/// ## No-Op Guarantee
/// When any of these is returned the cart is exactly as it was before the
/// attempted mutation. Quantity changes never clamp to the available
/// stock; they apply whole or not at all, so the operator always knows
/// the requested change did not happen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    /// Product has zero (or negative) stock; cannot start a line.
    #[error("'{name}' is out of stock")]
    OutOfStock { name: String },

    /// Incrementing an existing line would exceed the available stock.
    #[error("only {available} of '{name}' in stock")]
    StockLimitReached { name: String, available: i64 },

    /// The cart already holds every available unit; raised by the barcode
    /// scan path before it even attempts the add.
    #[error("cart already holds all {available} of '{name}'")]
    MaxStockInCartReached { name: String, available: i64 },

    /// An explicit quantity edit asked for more than is in stock.
    ///
    /// ## UI Behavior
    /// The line is left unchanged; the UI gives transient inline feedback
    /// (the original shakes the quantity field).
    #[error("requested {requested} of '{name}' but only {available} in stock")]
    ExceedsStock {
        name: String,
        requested: i64,
        available: i64,
    },
}

// =============================================================================
// Commit Error
// =============================================================================

/// Sale commit failures.
///
/// When a commit fails, no `Sale` record exists and no stock was
/// deducted. There is no automatic retry: the operator adjusts the cart
/// and resubmits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    /// Nothing in the cart to sell.
    #[error("cannot complete a sale with an empty cart")]
    EmptyCart,

    /// One or more lines exceed the *live* stock at commit time.
    ///
    /// ## When This Occurs
    /// Stock may have changed since the cart was populated (an inventory
    /// correction, another flow selling the same product). The commit
    /// revalidates every line fresh and reports all offenders at once.
    #[error("insufficient stock for: {}", product_names.join(", "))]
    InsufficientStock { product_names: Vec<String> },
}

// =============================================================================
// Session Error
// =============================================================================

/// Umbrella error for session operations that can fail in more than one
/// category (e.g. a barcode scan can miss the catalog *or* hit a stock
/// limit).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PosError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

// =============================================================================
// Unit Tests
// =============================================================================
