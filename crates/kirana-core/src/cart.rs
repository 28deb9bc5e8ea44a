//! # Cart Engine
//!
//! The in-progress transaction: line items plus an optional discount.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Cart State Machine                           │
//! │                                                                     │
//! │              add_product / scan                                     │
//! │   ┌───────┐ ───────────────────► ┌───────────┐                      │
//! │   │ Empty │                      │ Populated │ ◄──┐ mutations       │
//! │   └───────┘ ◄─────────────────── └───────────┘ ───┘                 │
//! │       ▲         clear /                │                            │
//! │       │         last line removed      │ complete_sale (session)    │
//! │       │                                ▼                            │
//! │       └──────────────────────── (committed: session snapshots       │
//! │              cart cleared        the lines then clears the cart)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Discipline
//! The cart holds **at most one line per product**; adding an existing
//! product increments its quantity. Every mutation is checked against the
//! stock level of the product passed in, and applies exactly or not at
//! all. There is no silent clamping: if the operator asks for 10 and only
//! 7 exist, the line stays at its previous quantity and the caller gets
//! [`StockError::ExceedsStock`].

use crate::error::StockError;
use crate::types::{DiscountSpec, Product, SaleLineItem};

/// The in-progress cart: ordered line items plus an optional discount.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<SaleLineItem>,
    discount: Option<DiscountSpec>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - No line yet: requires `stock > 0`, starts a quantity-1 line at
    ///   the end of the cart, freezing name and price
    /// - Line exists: increments only if the new quantity still fits in
    ///   stock, otherwise [`StockError::StockLimitReached`] and the cart
    ///   is untouched
    pub fn add_product(&mut self, product: &Product) -> Result<(), StockError> {
        match self.position_of(&product.id) {
            Some(idx) => {
                let line = &mut self.items[idx];
                if line.quantity + 1 > product.stock {
                    return Err(StockError::StockLimitReached {
                        name: product.name.clone(),
                        available: product.stock,
                    });
                }
                line.quantity += 1;
            }
            None => {
                if product.stock <= 0 {
                    return Err(StockError::OutOfStock {
                        name: product.name.clone(),
                    });
                }
                self.items.push(SaleLineItem::from_product(product));
            }
        }
        Ok(())
    }

    /// Sets a line's quantity directly (the editable quantity field).
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: removes the line
    /// - `0 < new_quantity <= stock`: replaces the quantity
    /// - `new_quantity > stock`: [`StockError::ExceedsStock`], line
    ///   unchanged
    /// - No line for this product: silent no-op (a removed line's pending
    ///   UI event must not resurrect it)
    pub fn update_quantity(
        &mut self,
        product: &Product,
        new_quantity: i64,
    ) -> Result<(), StockError> {
        let Some(idx) = self.position_of(&product.id) else {
            return Ok(());
        };

        if new_quantity <= 0 {
            self.items.remove(idx);
            return Ok(());
        }

        if new_quantity > product.stock {
            return Err(StockError::ExceedsStock {
                name: product.name.clone(),
                requested: new_quantity,
                available: product.stock,
            });
        }

        self.items[idx].quantity = new_quantity;
        Ok(())
    }

    /// Removes a product's line entirely. Unknown ids are a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.items.retain(|line| line.product_id != product_id);
    }

    /// Sets or clears the cart-level discount.
    pub fn set_discount(&mut self, discount: Option<DiscountSpec>) {
        self.discount = discount;
    }

    /// Empties the cart: all lines and the discount.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = None;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The current line items in add order.
    pub fn items(&self) -> &[SaleLineItem] {
        &self.items
    }

    /// The current discount, if any.
    pub fn discount(&self) -> Option<DiscountSpec> {
        self.discount
    }

    /// The line for a product, if present.
    pub fn line(&self, product_id: &str) -> Option<&SaleLineItem> {
        self.items.iter().find(|l| l.product_id == product_id)
    }

    /// Units of a product currently in the cart (0 when no line).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Total units across all lines (the cart badge count).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position_of(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
