//! # Repository Module
//!
//! Database repository implementations for Kirana POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean   │
//! │  API over the domain types from kirana-core.                       │
//! │                                                                     │
//! │  InventoryService                                                   │
//! │       │                                                             │
//! │       │  db.products().list_all()                                   │
//! │       ▼                                                             │
//! │  ProductRepository                                                  │
//! │  ├── list_all(&self)                                                │
//! │  ├── insert(&self, product)                                         │
//! │  ├── update(&self, product)                                         │
//! │  └── deduct_stock(&self, id, qty)                                   │
//! │       │                                                             │
//! │       │  SQL Query                                                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Domain types in, domain types out                                │
//! │  • Easy to test against in-memory SQLite                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and stock deduction
//! - [`sale::SaleRepository`] - Sale recording and history
//! - [`meta::MetaRepository`] - Shop key/value metadata

pub mod meta;
pub mod product;
pub mod sale;
