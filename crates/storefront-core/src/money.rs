//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Precision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Feed price 1000.004 ──► Money(1000.004)      (kept as served)          │
//! │                              │                                          │
//! │           ┌──────────────────┼─────────────────────┐                    │
//! │           ▼                  ▼                     ▼                    │
//! │   price filter         line total            cart total                 │
//! │   (raw compare)        (raw amount × qty)    (raw sum)                  │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                    Display / format_with ──► "$x.yy"    │
//! │                                                                         │
//! │  Rounding happens ONLY when a value is formatted.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic is IEEE-754 and total: no operation panics, whatever the
//! magnitude.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::new(10.99);
//!
//! let doubled = price.multiply_quantity(2);       // 21.98
//! let total = price + Money::from_cents(500);     // 15.99
//! assert_eq!(total.to_string(), "$15.99");
//! # let _ = doubled;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units, at full precision.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► CartLine.line_total ──► Cart.total_price
///                 │
///                 └──► PriceRange bounds (catalog filter)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from an amount in major units.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price, Money::new(10.99));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(cents as f64 / 100.0)
    }

    /// The exact amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// The amount rounded to the nearest cent, for presentation.
    ///
    /// Saturates at the `i64` bounds.
    pub fn cents(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // 2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u64) -> Self {
        Money(self.0 * qty as f64)
    }

    /// Formats the amount with `symbol`, rounded to `decimals` places.
    ///
    /// A value that rounds to zero is printed without a sign.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::new(1234.5).format_with("€", 2), "€1234.50");
    /// assert_eq!(Money::new(-0.001).format_with("$", 2), "$0.00");
    /// assert_eq!(Money::new(7.6).format_with("¥", 0), "¥8");
    /// ```
    pub fn format_with(&self, symbol: &str, decimals: usize) -> String {
        let digits = format!("{:.*}", decimals, self.0.abs());
        let negative = self.0 < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
        format!("{}{}{}", if negative { "-" } else { "" }, symbol, digits)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$x.yy`.
///
/// ## Note
/// This is for logs and the plain shell. Configured display belongs to the
/// presentation layer (see `ConfigState::format_currency` in the app).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$", 2))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Summing line totals into a cart total.
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money, Money::new(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_sub_cent_amounts_survive_until_display() {
        let price = Money::new(0.004);
        let total = price.multiply_quantity(3);

        assert!((total.amount() - 0.012).abs() < 1e-12);
        assert_eq!(total.to_string(), "$0.01");
        assert_eq!(price.to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [109_95, 22_30, 55_99]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 188_24);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let price = Money::new(1e17);
        let total = price.multiply_quantity(2) + price.multiply_quantity(u64::MAX);

        assert!(total.amount() > 1e17);
        assert_eq!(price.multiply_quantity(2).amount(), 2e17);
    }

    #[test]
    fn test_format_with_negative_zero() {
        assert_eq!(Money::new(-0.004).to_string(), "$0.00");
        assert_eq!(Money::new(-0.006).to_string(), "-$0.01");
    }
}
