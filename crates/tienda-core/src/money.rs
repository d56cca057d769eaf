//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! All monetary values are integer cents. The catalog wire format carries
//! decimal prices; the catalog adapter converts them to cents exactly once
//! at that boundary, and everything downstream stays in integers.
//!
//! ## Usage
//! ```rust
//! use tienda_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1999); // $19.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // $39.98
//! let total = price + Money::from_cents(2199); // $41.98
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 2100 bps = 21%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// Signed so that derived deltas (price drops, refunds) can be expressed;
/// catalog prices and cart totals themselves are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // Represents $19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::from_major_minor(19, 99); // $19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Calculates tax on this amount.
    ///
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`,
    /// performed in i128 so large amounts cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::{Money, TaxRate};
    ///
    /// let subtotal = Money::from_cents(6197); // $61.97
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(2100)); // 21%
    /// assert_eq!(tax.cents(), 1301); // $13.01
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.major(), 19);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(19, 99);
        assert_eq!(money.cents(), 1999);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1999)), "$19.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_order_tax_rate() {
        // $61.97 at 21% = $13.0137 → $13.01
        let amount = Money::from_cents(6197);
        let tax = amount.calculate_tax(TaxRate::from_bps(2100));
        assert_eq!(tax.cents(), 1301);
        assert_eq!((amount + tax).cents(), 7498);
    }

    #[test]
    fn test_tax_rounding_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        let tax = amount.calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.cents(), 83);
    }

    #[test]
    fn test_zero_tax() {
        let amount = Money::from_cents(1000);
        assert_eq!(amount.calculate_tax(TaxRate::zero()).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(1999);
        assert_eq!(unit_price.multiply_quantity(2).cents(), 3998);
    }

    #[test]
    fn test_serde_round_trip() {
        let money = Money::from_cents(2199);
        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(money, back);
    }
}
