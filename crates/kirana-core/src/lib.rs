//! # kirana-core: Pure Business Logic for Kirana POS
//!
//! This crate is the **heart** of Kirana POS. It contains the product
//! catalog, the cart engine, the pricing calculator and the sale committer
//! as pure, synchronous logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Architecture                        │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                      UI Layer (external)                    │   │
//! │  │   Barcode input ─► Cart panel ─► Totals ─► Receipt view     │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                  │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌────────┐ ┌─────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │  │ catalog │ │  cart  │ │ pricing │ │ session │ │ types  │  │   │
//! │  │  │ CRUD +  │ │ stock- │ │ totals  │ │ commit  │ │Product │  │   │
//! │  │  │ indexes │ │ aware  │ │ (pure)  │ │ + ledger│ │ Sale   │  │   │
//! │  │  └─────────┘ └────────┘ └─────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                 kirana-db (Persistence Layer)               │   │
//! │  │          SQLite repositories, write-through service         │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, DiscountSpec, ShopProfile)
//! - [`money`] - Display rounding/formatting for f64 amounts
//! - [`error`] - Structured failure signals
//! - [`validation`] - Input validation (barcode format, names, prices)
//! - [`catalog`] - Product catalog with O(1) id and barcode lookup
//! - [`cart`] - Stock-aware cart mutations
//! - [`pricing`] - Pure subtotal/discount/tax/total pipeline
//! - [`session`] - The live POS session: cart + catalog + sale committer
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: pricing is deterministic - same input, same output
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **No silent clamping**: cart mutations apply exactly or not at all
//! 4. **Explicit errors**: all failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Product` instead of
// `use kirana_core::types::Product`.

pub use cart::Cart;
pub use catalog::Catalog;
pub use error::{CatalogError, CommitError, PosError, StockError, ValidationError};
pub use pricing::{price_cart, Totals};
pub use session::PosSession;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum barcode length in digits.
///
/// ## Business Reason
/// The shortest real-world retail symbology the shop scans is EAN-8.
pub const BARCODE_MIN_DIGITS: usize = 8;

/// Maximum barcode length in digits.
///
/// ## Business Reason
/// EAN-13 / GTIN-13 is the longest code the scanner hardware emits.
pub const BARCODE_MAX_DIGITS: usize = 13;
