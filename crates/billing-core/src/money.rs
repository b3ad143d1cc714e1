//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At the counter:                                                        │
//! │    "Amount Paid: 130" compared against a float total of 129.99999       │
//! │    → customer is told they underpaid                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹130 = 13000 paise, compared exactly                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billing_core::money::Money;
//!
//! let milk = Money::from_rupees(50);
//! let line = milk * 2_i64;                     // ₹100
//! let total = line + Money::from_rupees(30);   // ₹130
//! assert_eq!(total.to_string(), "₹130");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

/// Paise per rupee.
pub const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: change due and shortfalls are plain subtractions
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Saturating arithmetic**: quantities have no upper bound, so products
///   and sums clamp at `i64::MAX` instead of wrapping
/// - **Serialized as paise**: `₹130` is the JSON number `13000`
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► CartLine.unit_price ──► CartLine.subtotal           │
/// │                                                  │                      │
/// │                                                  ▼                      │
/// │                       Cart.total ──► Checkout gate ──► Receipt.change  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    ///
    /// let price = Money::from_paise(4550); // ₹45.50
    /// assert_eq!(price.paise(), 4550);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(PAISE_PER_RUPEE))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use billing_core::money::Money;
    ///
    /// let milk = Money::from_rupees(50);
    /// assert_eq!(milk.multiply_quantity(2), Money::from_rupees(100));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with the given currency symbol.
    ///
    /// Whole amounts drop the paise (`₹130`), anything else shows two
    /// decimals (`₹130.50`). This matches how the counter prints prices.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = (self.0 / PAISE_PER_RUPEE).unsigned_abs();
        match self.paise_part() {
            0 => format!("{}{}{}", sign, symbol, rupees),
            paise => format!("{}{}{}.{:02}", sign, symbol, rupees, paise),
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("₹"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(130);
        assert_eq!(money.paise(), 13000);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_from_rupees_saturates() {
        assert_eq!(Money::from_rupees(i64::MAX / 10).paise(), i64::MAX);
        assert_eq!(Money::from_rupees(i64::MIN / 10).paise(), i64::MIN);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(130).to_string(), "₹130");
        assert_eq!(Money::from_paise(13050).to_string(), "₹130.50");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0");
    }

    #[test]
    fn test_format_with_other_symbol() {
        assert_eq!(Money::from_rupees(45).format_with("Rs "), "Rs 45");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(100);
        let b = Money::from_rupees(30);

        assert_eq!(a + b, Money::from_rupees(130));
        assert_eq!(a - b, Money::from_rupees(70));
        assert_eq!(b * 3_i64, Money::from_rupees(90));
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_rupees(100), Money::from_rupees(30)];
        let total: Money = lines.iter().sum();
        assert_eq!(total, Money::from_rupees(130));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_multiply_saturates() {
        let price = Money::from_rupees(120);
        assert_eq!(price.multiply_quantity(i64::MAX).paise(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::from_paise(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_paise(-1).is_positive());
        assert!(Money::from_rupees(100) > Money::from_rupees(30));
    }
}
