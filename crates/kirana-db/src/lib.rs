//! # kirana-db: Persistence Layer for Kirana POS
//!
//! This crate provides database access for Kirana POS. It uses SQLite
//! for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Data Flow                           │
//! │                                                                     │
//! │  Caller (UI shell, seed binary, tests)                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                   kirana-db (THIS CRATE)                    │   │
//! │  │                                                             │   │
//! │  │  ┌──────────────────┐   ┌──────────────┐   ┌─────────────┐  │   │
//! │  │  │ InventoryService │   │ Repositories │   │ Migrations  │  │   │
//! │  │  │  (service.rs)    │──►│ product.rs   │   │ (embedded)  │  │   │
//! │  │  │                  │   │ sale.rs      │   │             │  │   │
//! │  │  │ PosSession +     │   │ meta.rs      │   │ 001_init.sql│  │   │
//! │  │  │ write-through    │   │              │   │             │  │   │
//! │  │  └──────────────────┘   └──────┬───────┘   └─────────────┘  │   │
//! │  │                                │                            │   │
//! │  │                         Database (pool.rs)                  │   │
//! │  └────────────────────────────────┼────────────────────────────┘   │
//! │                                   ▼                                │
//! │                          SQLite Database                           │
//! │                          ./kirana.db (WAL)                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale, meta)
//! - [`service`] - Write-through [`service::InventoryService`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kirana_core::ShopProfile;
//! use kirana_db::{Database, DbConfig, InventoryService};
//!
//! let db = Database::new(DbConfig::new("./kirana.db")).await?;
//! let profile = ShopProfile {
//!     user_id: "shop-1".into(),
//!     shop_name: "Sharma General Store".into(),
//!     tax_rate_percent: 5.0,
//! };
//! let mut pos = InventoryService::open(db, profile).await?;
//!
//! pos.scan_barcode("8901234567890")?;
//! let sale = pos.complete_sale().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use service::InventoryService;

// Repository re-exports for convenience
pub use repository::meta::MetaRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
