//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats, 12% off a $4.99 drink is 0.5988 and every rule that      │
//! │  stacks a percentage on top of a markdown drifts a little further.     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    499 cents × 12% = 59.88 → 60 cents (half-up, once, at the cent)     │
//! │    Σ (price − discount) is then exact integer addition                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.cents(), 1599);
//!
//! // Catalog prices arrive as decimal text and are parsed exactly
//! let parsed = Money::parse_decimal("12.5").unwrap();
//! assert_eq!(parsed.cents(), 1250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a markdown whose special price exceeds the item
///   price produces a negative discount, and that must be representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  catalog "price" ──► LineItem.price ──┬──► LineItem.net_price()         │
/// │                                       │                                 │
/// │  rule parameters ──► LineItem.discount┘                                 │
/// │                                                                         │
/// │  Σ net_price ──► Cart.total ──► receipt                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(65).cents(), 6500);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Returns `percent`% of this amount, rounded half away from zero to the cent.
    ///
    /// ## Implementation
    /// Integer math on i128: `(cents × percent ± 50) / 100`. The sign-aware
    /// offset keeps `-x.percent_of(p) == -(x.percent_of(p))`, which matters
    /// when a markdown pushed a net price below zero before a percentage
    /// is stacked on it.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(30000); // $300.00
    /// assert_eq!(price.percent_of(20).cents(), 6000);
    ///
    /// // $4.99 × 12% = $0.5988 → $0.60
    /// assert_eq!(Money::from_cents(499).percent_of(12).cents(), 60);
    /// ```
    pub fn percent_of(&self, percent: u8) -> Money {
        let raw = i128::from(self.0) * i128::from(percent);
        let rounded = if raw >= 0 {
            (raw + 50) / 100
        } else {
            (raw - 50) / 100
        };
        // |rounded| <= |self.0| because percent <= 255 is divided by 100 and
        // callers validate percent <= 100; the cast cannot truncate there.
        Money(rounded as i64)
    }

    /// Parses a decimal amount such as `"65"`, `"12.5"` or `"0.99"` into cents.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, optionally followed by `.` and fraction digits
    /// - At most two significant fraction digits (`"1.500"` is fine,
    ///   `"1.505"` is rejected rather than silently rounded)
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("65").unwrap().cents(), 6500);
    /// assert_eq!(Money::parse_decimal("0.99").unwrap().cents(), 99);
    /// assert!(Money::parse_decimal("1.505").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> ValidationResult<Money> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (major, minor) = digits.split_once('.').unwrap_or((digits, ""));

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }

        let minor = if minor.len() > 2 {
            let (kept, rest) = minor.split_at(2);
            if rest.bytes().any(|b| b != b'0') {
                return Err(invalid("at most two decimal places are allowed"));
            }
            kept
        } else {
            minor
        };

        let major: i64 = major
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor_cents = match minor.len() {
            0 => 0,
            1 => i64::from(minor.as_bytes()[0] - b'0') * 10,
            _ => i64::from(minor.as_bytes()[0] - b'0') * 10 + i64::from(minor.as_bytes()[1] - b'0'),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor_cents))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$10.99`.
///
/// ## Note
/// Locale-aware formatting is out of scope; this is what the receipt prints.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, self.dollars().abs(), self.cents_part());
        // Route through `pad` so width/alignment flags work in receipts.
        f.pad(&text)
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
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
