//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    The storefront prices in dong, which has no minor unit in use,      │
//! │    so 120.000 ₫ is stored as 120000. Every cart sum stays exact.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use butterfly_core::money::Money;
//!
//! let price = Money::from_minor(120_000);
//! let line_total = price.saturating_mul_qty(2);
//! assert_eq!(line_total.minor(), 240_000);
//! assert_eq!(line_total.format_grouped('.'), "240.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: the store never validates prices, so a negative price
///   from a bad caller must still add up without wrapping
/// - **Single field tuple struct**: serializes as a bare JSON number, which
///   is exactly the `price` field of a persisted line item
///
/// ## Where Money Is Used
/// ```text
/// CartLineItem.price ──► line_total ──► Cart::total ──► CheckoutSummary
///                                                            │
///                                       OrderDraft.order_amount ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    ///
    /// Cart selectors must never panic, so overflow clamps instead of
    /// wrapping or aborting.
    ///
    /// ```rust
    /// use butterfly_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(50).saturating_mul_qty(3).minor(), 150);
    /// assert_eq!(Money::from_minor(i64::MAX).saturating_mul_qty(2).minor(), i64::MAX);
    /// ```
    #[inline]
    pub const fn saturating_mul_qty(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a thousands separator, e.g. `1.234.567`.
    ///
    /// This is how the storefront renders dong amounts (`vi-VN` grouping).
    /// Currency symbols are added by the host config, not here.
    pub fn format_grouped(&self, separator: char) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw minor-unit amount.
///
/// Use [`Money::format_grouped`] (or the host's currency formatter) for UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates; see [`Money::saturating_mul_qty`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(120_000);
        assert_eq!(money.minor(), 120_000);
        assert_eq!(money.to_string(), "120000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.minor(), 1500);
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_saturating_arithmetic_never_panics() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!((max + Money::from_minor(1)).minor(), i64::MAX);
        assert_eq!(max.saturating_mul_qty(10).minor(), i64::MAX);
        assert_eq!(
            Money::from_minor(i64::MIN).saturating_mul_qty(2).minor(),
            i64::MIN
        );
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_minor(0).format_grouped('.'), "0");
        assert_eq!(Money::from_minor(999).format_grouped('.'), "999");
        assert_eq!(Money::from_minor(1000).format_grouped('.'), "1.000");
        assert_eq!(Money::from_minor(620_000).format_grouped('.'), "620.000");
        assert_eq!(Money::from_minor(1_234_567).format_grouped(','), "1,234,567");
        assert_eq!(Money::from_minor(-30_000).format_grouped('.'), "-30.000");
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::from_minor(350)).unwrap();
        assert_eq!(json, "350");
        let back: Money = serde_json::from_str("350").unwrap();
        assert_eq!(back, Money::from_minor(350));
    }
}
