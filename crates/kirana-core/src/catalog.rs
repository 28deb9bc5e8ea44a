//! # Product Catalog
//!
//! In-memory product catalog with uniqueness enforcement and O(1) lookup.
//!
//! ## Index Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Catalog                                   │
//! │                                                                     │
//! │  products: Vec<Product>        insertion order, the source of      │
//! │      ▲                         truth handed to dashboards          │
//! │      │ index into vec                                               │
//! │  by_id:      HashMap<String, usize>   ── id lookup                  │
//! │  by_barcode: HashMap<String, usize>   ── scanner lookup             │
//! │                                                                     │
//! │  Both maps point at positions in `products`; every mutation keeps  │
//! │  them consistent. Empty barcodes are never indexed.                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Uniqueness Rules
//! - Names are unique **case-insensitively** on their trimmed form
//!   ("Milk" and " milk " collide)
//! - Barcodes are unique on their exact trimmed form; empty barcodes are
//!   exempt (any number of products may have no barcode)
//!
//! Format validation (barcode digits, non-negative price) belongs to
//! [`crate::validation`]; the catalog enforces uniqueness regardless.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::CatalogError;
use crate::types::{NewProduct, Product};

/// The shop's product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
    by_barcode: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a catalog from persisted products.
    ///
    /// Used when loading state from the database. Id uniqueness is the
    /// storage layer's PRIMARY KEY; name/barcode collisions in the input
    /// indicate corrupted storage and are rejected here.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for product in products {
            catalog.check_duplicates(&product.name, &product.barcode, None)?;
            catalog.insert_indexed(product);
        }
        Ok(catalog)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Adds a new product, assigning it a fresh UUID.
    ///
    /// Name and barcode are stored trimmed. Returns a reference to the
    /// stored product so callers can read the assigned id.
    pub fn add(&mut self, input: NewProduct) -> Result<&Product, CatalogError> {
        let name = input.name.trim().to_string();
        let barcode = input.barcode.trim().to_string();

        self.check_duplicates(&name, &barcode, None)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            category: input.category.trim().to_string(),
            price: input.price,
            stock: input.stock,
            low_stock_threshold: input.low_stock_threshold,
            expiry_date: input.expiry_date,
            barcode,
        };

        let idx = self.insert_indexed(product);
        Ok(&self.products[idx])
    }

    /// Replaces an existing product wholesale.
    ///
    /// Duplicate checks exclude the product's own row, so saving a form
    /// without renaming does not trip the name check.
    pub fn update(&mut self, updated: Product) -> Result<(), CatalogError> {
        let idx = *self
            .by_id
            .get(&updated.id)
            .ok_or_else(|| CatalogError::NotFound {
                reference: updated.id.clone(),
            })?;

        let name = updated.name.trim().to_string();
        let barcode = updated.barcode.trim().to_string();
        self.check_duplicates(&name, &barcode, Some(&updated.id))?;

        let old_barcode = self.products[idx].barcode.clone();
        if !old_barcode.is_empty() {
            self.by_barcode.remove(&old_barcode);
        }
        if !barcode.is_empty() {
            self.by_barcode.insert(barcode.clone(), idx);
        }

        self.products[idx] = Product {
            name,
            barcode,
            ..updated
        };
        Ok(())
    }

    /// Removes a product by id, returning it if it existed.
    ///
    /// Unconditional: products that appear in past sales may be removed;
    /// sale line items hold snapshots and are unaffected.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let idx = self.by_id.remove(id)?;
        let product = self.products.remove(idx);
        if !product.barcode.is_empty() {
            self.by_barcode.remove(&product.barcode);
        }
        // Every product after the removed slot shifted left by one.
        for (i, p) in self.products.iter().enumerate().skip(idx) {
            self.by_id.insert(p.id.clone(), i);
            if !p.barcode.is_empty() {
                self.by_barcode.insert(p.barcode.clone(), i);
            }
        }
        Some(product)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&idx| &self.products[idx])
    }

    /// Looks up a product by exact barcode. Empty barcodes never match.
    pub fn get_by_barcode(&self, barcode: &str) -> Option<&Product> {
        if barcode.is_empty() {
            return None;
        }
        self.by_barcode.get(barcode).map(|&idx| &self.products[idx])
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Deducts sold units from a product's stock.
    ///
    /// Called by the sale committer only, after it has re-validated every
    /// line against live stock. Unknown ids are ignored (the committer
    /// already verified existence).
    pub(crate) fn deduct_stock(&mut self, id: &str, quantity: i64) {
        if let Some(&idx) = self.by_id.get(id) {
            self.products[idx].stock -= quantity;
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_duplicates(
        &self,
        name: &str,
        barcode: &str,
        exclude_id: Option<&str>,
    ) -> Result<(), CatalogError> {
        let name_lower = name.to_lowercase();
        for p in &self.products {
            if Some(p.id.as_str()) == exclude_id {
                continue;
            }
            if p.name.to_lowercase() == name_lower {
                return Err(CatalogError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        if !barcode.is_empty() {
            if let Some(&idx) = self.by_barcode.get(barcode) {
                if Some(self.products[idx].id.as_str()) != exclude_id {
                    return Err(CatalogError::DuplicateBarcode {
                        barcode: barcode.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn insert_indexed(&mut self, product: Product) -> usize {
        let idx = self.products.len();
        self.by_id.insert(product.id.clone(), idx);
        if !product.barcode.is_empty() {
            self.by_barcode.insert(product.barcode.clone(), idx);
        }
        self.products.push(product);
        idx
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_product(name: &str, barcode: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Dairy".to_string(),
            price: 60.0,
            stock: 50,
            low_stock_threshold: 10,
            expiry_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            barcode: barcode.to_string(),
        }
    }

    #[test]
    fn add_assigns_uuid_and_trims() {
        let mut catalog = Catalog::new();
        let product = catalog
            .add(new_product("  Organic Milk  ", " 8901234567890 "))
            .unwrap();

        assert_eq!(product.name, "Organic Milk");
        assert_eq!(product.barcode, "8901234567890");
        assert_eq!(product.id.len(), 36); // UUID v4 text form
    }

    #[test]
    fn duplicate_name_is_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog.add(new_product("Organic Milk", "")).unwrap();

        let err = catalog.add(new_product("  organic milk ", "")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { .. }));
    }

    #[test]
    fn duplicate_barcode_rejected_but_empty_exempt() {
        let mut catalog = Catalog::new();
        catalog.add(new_product("Organic Milk", "8901234567890")).unwrap();

        let err = catalog
            .add(new_product("Brown Bread", "8901234567890"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateBarcode { .. }));

        // Multiple products with no barcode are fine.
        catalog.add(new_product("Brown Bread", "")).unwrap();
        catalog.add(new_product("Cheddar Cheese", "")).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn update_excludes_own_row_from_duplicate_checks() {
        let mut catalog = Catalog::new();
        let id = catalog
            .add(new_product("Organic Milk", "8901234567890"))
            .unwrap()
            .id
            .clone();

        // Saving the same name/barcode back must not collide with itself.
        let mut product = catalog.get(&id).unwrap().clone();
        product.price = 65.0;
        catalog.update(product).unwrap();
        assert_eq!(catalog.get(&id).unwrap().price, 65.0);
    }

    #[test]
    fn update_reindexes_changed_barcode() {
        let mut catalog = Catalog::new();
        let id = catalog
            .add(new_product("Organic Milk", "8901234567890"))
            .unwrap()
            .id
            .clone();

        let mut product = catalog.get(&id).unwrap().clone();
        product.barcode = "8901111111111".to_string();
        catalog.update(product).unwrap();

        assert!(catalog.get_by_barcode("8901234567890").is_none());
        assert_eq!(catalog.get_by_barcode("8901111111111").unwrap().id, id);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut catalog = Catalog::new();
        let product = Product {
            id: "missing".to_string(),
            name: "Ghost".to_string(),
            category: "None".to_string(),
            price: 1.0,
            stock: 1,
            low_stock_threshold: 1,
            expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            barcode: String::new(),
        };
        assert!(matches!(
            catalog.update(product),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_keeps_indexes_consistent() {
        let mut catalog = Catalog::new();
        let a = catalog.add(new_product("A", "11111111")).unwrap().id.clone();
        let b = catalog.add(new_product("B", "22222222")).unwrap().id.clone();
        let c = catalog.add(new_product("C", "33333333")).unwrap().id.clone();

        let removed = catalog.remove(&a).unwrap();
        assert_eq!(removed.name, "A");
        assert!(catalog.get(&a).is_none());
        assert!(catalog.get_by_barcode("11111111").is_none());

        // Shifted entries still resolve.
        assert_eq!(catalog.get(&b).unwrap().name, "B");
        assert_eq!(catalog.get_by_barcode("33333333").unwrap().id, c);

        // Freed name and barcode are reusable.
        catalog.add(new_product("A", "11111111")).unwrap();
    }

    #[test]
    fn from_products_rejects_duplicates() {
        let make = |id: &str, name: &str, barcode: &str| Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "X".to_string(),
            price: 1.0,
            stock: 1,
            low_stock_threshold: 1,
            expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            barcode: barcode.to_string(),
        };

        let ok = Catalog::from_products(vec![
            make("1", "Milk", "11111111"),
            make("2", "Bread", ""),
        ])
        .unwrap();
        assert_eq!(ok.len(), 2);

        let err = Catalog::from_products(vec![
            make("1", "Milk", "11111111"),
            make("2", "MILK", "22222222"),
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn deduct_stock_only_touches_target() {
        let mut catalog = Catalog::new();
        let a = catalog.add(new_product("A", "")).unwrap().id.clone();
        let b = catalog.add(new_product("B", "")).unwrap().id.clone();

        catalog.deduct_stock(&a, 3);
        assert_eq!(catalog.get(&a).unwrap().stock, 47);
        assert_eq!(catalog.get(&b).unwrap().stock, 50);
    }
}
