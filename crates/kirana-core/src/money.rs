//! # Money Helpers
//!
//! Display rounding and formatting for monetary `f64` values.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  NUMERIC SEMANTICS                                                  │
//! │                                                                     │
//! │  The pricing pipeline computes in f64 end to end and rounds ONLY   │
//! │  at display time. Rounding between steps would compound error:     │
//! │                                                                     │
//! │    subtotal 120 → 10% discount → 108 → 5% tax → 5.40 → 113.40      │
//! │                                                                     │
//! │  Every intermediate value stays exact-as-computed; round_display   │
//! │  is applied once, when a number reaches a receipt or screen.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted sale totals store the unrounded values for the same reason:
//! reports re-aggregate the raw numbers and round once at the end.

use std::fmt;

/// Rounds a monetary amount to 2 decimal places for display.
///
/// ## Example
/// ```rust
/// use kirana_core::money::round_display;
///
/// assert_eq!(round_display(5.4000000000000004), 5.4);
/// assert_eq!(round_display(113.456), 113.46);
/// ```
#[inline]
pub fn round_display(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A display wrapper that formats an amount with the rupee sign and two
/// decimals, e.g. `₹113.40`.
///
/// ## Note
/// This is for receipts and debugging. Localized UI formatting belongs to
/// the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rupees(pub f64);

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        let sign = if amount < 0.0 { "-" } else { "" };
        write!(f, "{}₹{:.2}", sign, round_display(amount.abs()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_float_noise_away() {
        // 108 * 0.05 picks up binary representation noise.
        let tax = 108.0_f64 * (5.0 / 100.0);
        assert_eq!(round_display(tax), 5.4);
    }

    #[test]
    fn rounds_half_up_at_two_decimals() {
        assert_eq!(round_display(0.005), 0.01);
        assert_eq!(round_display(1.994), 1.99);
        assert_eq!(round_display(1.996), 2.0);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format!("{}", Rupees(113.4)), "₹113.40");
        assert_eq!(format!("{}", Rupees(0.0)), "₹0.00");
        assert_eq!(format!("{}", Rupees(-5.5)), "-₹5.50");
    }
}
