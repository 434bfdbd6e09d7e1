//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The upstream dashboard did all pricing in JS floats:                   │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    rounding happened ad hoc at render time via toFixed()                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹118.00 = 11800 paise, exact at every step                          │
//! │    GST is the only operation that can produce a fraction, and it       │
//! │    rounds half-up at the paisa - ONE rule, applied in ONE place        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitaran_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(10000); // ₹100.00
//!
//! // Arithmetic operations
//! let line = price * 10;                       // ₹1000.00
//! let total = line + Money::from_paise(500);   // ₹1005.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100th of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Wallet balances may legitimately go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the engine flows through this type: SKU prices,
/// tier overrides, line subtotals, GST, wallet balances, credit limits,
/// and edit deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vitaran_core::money::Money;
    ///
    /// let price = Money::from_paise(10099); // Represents ₹100.99
    /// assert_eq!(price.paise(), 10099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use vitaran_core::money::Money;
    ///
    /// let price = Money::from_rupees(100); // ₹100.00
    /// assert_eq!(price.paise(), 10000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99, sign dropped).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates GST on this amount, rounding half-up at the paisa.
    ///
    /// ## Rounding
    /// The upstream dashboard was inconsistent about when it rounded
    /// (`toFixed` at render time, raw floats everywhere else). Here the
    /// rule is uniform: GST is the only fractional operation, and it
    /// rounds half-up exactly once.
    ///
    /// ## Implementation
    /// Integer math in i128 to avoid overflow:
    /// `(amount_paise * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use vitaran_core::money::Money;
    /// use vitaran_core::types::GstRate;
    ///
    /// let line = Money::from_rupees(1000); // ₹1000.00
    /// let rate = GstRate::from_bps(1800);  // 18%
    ///
    /// // ₹1000.00 × 18% = ₹180.00
    /// assert_eq!(line.gst(rate), Money::from_rupees(180));
    /// ```
    pub fn gst(&self, rate: GstRate) -> Money {
        // rate.bps() is basis points: 1800 = 18%
        let gst_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(gst_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vitaran_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(29900); // ₹299.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.paise(), 89700); // ₹897.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and stock/funds messages. The frontend formats its own
/// display values to handle locale grouping (₹1,00,000.00) properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
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

/// Summation over an iterator of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
