//! # Pricing Calculator
//!
//! Pure totals computation for a cart.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Pipeline                              │
//! │                                                                     │
//! │  line items ──► subtotal = Σ price × quantity                       │
//! │                     │                                               │
//! │  discount spec ──► raw = percentage ? subtotal×v/100 : v            │
//! │                     │                                               │
//! │                 discount_amount = clamp(raw, 0, subtotal)           │
//! │                     │                                               │
//! │                 after_discount = subtotal − discount_amount         │
//! │                     │                                               │
//! │  tax rate % ───► tax_amount = after_discount × rate/100             │
//! │                     │                                               │
//! │                 total = after_discount + tax_amount                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rounding happens between steps; values stay exact-as-computed and
//! are rounded once at display time ([`crate::money::round_display`]).
//! The same inputs always produce the same [`Totals`], so callers may
//! recompute on every cart change.

use crate::types::{DiscountSpec, DiscountType, SaleLineItem};

/// The computed totals for a cart state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of line totals before discount and tax.
    pub subtotal: f64,
    /// Discount actually applied, clamped to `[0, subtotal]`.
    pub discount_amount: f64,
    /// Tax charged on the discounted subtotal.
    pub tax_amount: f64,
    /// Grand total: `subtotal - discount_amount + tax_amount`.
    pub total: f64,
}

/// Computes totals for a set of cart lines.
///
/// ## Discount Clamping
/// The raw discount (a percentage of the subtotal, or a fixed amount) is
/// clamped into `[0, subtotal]`: a ₹200 fixed discount on a ₹150 cart
/// applies as ₹150, and a non-positive entered value applies as zero. The
/// total can therefore never go negative from a discount.
///
/// ## Example
/// ```rust
/// use kirana_core::pricing::price_cart;
/// use kirana_core::types::{DiscountSpec, SaleLineItem};
///
/// let items = vec![SaleLineItem {
///     product_id: "p1".to_string(),
///     name: "Organic Milk".to_string(),
///     quantity: 2,
///     price: 60.0,
/// }];
/// let totals = price_cart(&items, Some(DiscountSpec::percentage(10.0)), 5.0);
/// assert_eq!(totals.subtotal, 120.0);
/// assert_eq!(totals.discount_amount, 12.0);
/// assert!((totals.total - 113.4).abs() < 1e-9);
/// ```
pub fn price_cart(
    items: &[SaleLineItem],
    discount: Option<DiscountSpec>,
    tax_rate_percent: f64,
) -> Totals {
    let subtotal: f64 = items.iter().map(SaleLineItem::line_total).sum();

    let raw = match discount {
        Some(spec) if spec.value > 0.0 => match spec.kind {
            DiscountType::Percentage => subtotal * spec.value / 100.0,
            DiscountType::Fixed => spec.value,
        },
        _ => 0.0,
    };
    let discount_amount = raw.clamp(0.0, subtotal);

    let after_discount = subtotal - discount_amount;
    let tax_amount = after_discount * tax_rate_percent / 100.0;

    Totals {
        subtotal,
        discount_amount,
        tax_amount,
        total: after_discount + tax_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn line(id: &str, price: f64, quantity: i64) -> SaleLineItem {
        SaleLineItem {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            quantity,
            price,
        }
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < EPS
    }

    #[test]
    fn empty_cart_is_all_zero() {
        let totals = price_cart(&[], None, 5.0);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn percentage_discount_with_tax() {
        // 2 × ₹50 + 1 × ₹20 = ₹120; 10% off = ₹12; 5% tax on ₹108 = ₹5.40.
        let items = vec![line("p1", 50.0, 2), line("p2", 20.0, 1)];
        let totals = price_cart(&items, Some(DiscountSpec::percentage(10.0)), 5.0);

        assert!(close(totals.subtotal, 120.0));
        assert!(close(totals.discount_amount, 12.0));
        assert!(close(totals.tax_amount, 5.4));
        assert!(close(totals.total, 113.4));
    }

    #[test]
    fn fixed_discount_clamps_to_subtotal() {
        // ₹200 off a ₹150 cart applies as ₹150; tax and total are zero.
        let items = vec![line("p1", 150.0, 1)];
        let totals = price_cart(&items, Some(DiscountSpec::fixed(200.0)), 5.0);

        assert!(close(totals.subtotal, 150.0));
        assert!(close(totals.discount_amount, 150.0));
        assert!(close(totals.tax_amount, 0.0));
        assert!(close(totals.total, 0.0));
    }

    #[test]
    fn non_positive_discount_value_applies_as_zero() {
        let items = vec![line("p1", 50.0, 2)];

        for value in [0.0, -10.0] {
            let totals = price_cart(&items, Some(DiscountSpec::fixed(value)), 5.0);
            assert!(close(totals.discount_amount, 0.0));
            assert!(close(totals.total, 105.0));

            let totals = price_cart(&items, Some(DiscountSpec::percentage(value)), 5.0);
            assert!(close(totals.discount_amount, 0.0));
        }
    }

    #[test]
    fn no_discount_equals_zero_discount() {
        let items = vec![line("p1", 33.0, 3)];
        let none = price_cart(&items, None, 12.0);
        let zero = price_cart(&items, Some(DiscountSpec::percentage(0.0)), 12.0);
        assert_eq!(none, zero);
    }

    #[test]
    fn tax_applies_to_discounted_subtotal() {
        // ₹100 subtotal, ₹40 fixed off, 10% tax → tax is ₹6, not ₹10.
        let items = vec![line("p1", 100.0, 1)];
        let totals = price_cart(&items, Some(DiscountSpec::fixed(40.0)), 10.0);

        assert!(close(totals.tax_amount, 6.0));
        assert!(close(totals.total, 66.0));
    }

    #[test]
    fn pricing_is_deterministic() {
        let items = vec![line("p1", 19.99, 3), line("p2", 7.5, 2)];
        let a = price_cart(&items, Some(DiscountSpec::percentage(12.5)), 8.25);
        let b = price_cart(&items, Some(DiscountSpec::percentage(12.5)), 8.25);
        assert_eq!(a, b);
    }

    #[test]
    fn identity_holds_unrounded() {
        let items = vec![line("p1", 19.99, 3), line("p2", 7.5, 2)];
        let t = price_cart(&items, Some(DiscountSpec::percentage(7.0)), 5.0);
        assert!(close(
            t.total,
            t.subtotal - t.discount_amount + t.tax_amount
        ));
    }
}
