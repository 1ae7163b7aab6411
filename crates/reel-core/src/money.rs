//! # Money Module
//!
//! Provides the `Money` type for daily rates and rental fees.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 × 3 = 0.30000000000000004  ❌ WRONG!                             │
//! │                                                                         │
//! │  A rental fee is rate × days. Stored as floats, a 0.10/day movie       │
//! │  kept 3 days bills 0.30000000000000004.                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 cents × 3 days = 30 cents, exactly                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use reel_core::money::Money;
//!
//! let rate = Money::from_cents(250); // 2.50 per day
//! let fee = rate.times_days(4);
//! assert_eq!(fee.cents(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Movie.daily_rental_rate ──► Rental.movie.daily_rental_rate (snapshot)
///                                        │
///                                        ▼
///                            Return: rate × days rented
///                                        │
///                                        ▼
///                                 Rental.rental_fee
/// ```
///
/// Serialized as a bare integer of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use reel_core::money::Money;
    ///
    /// let rate = Money::from_cents(199);
    /// assert_eq!(rate.cents(), 199);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a daily amount by a number of days.
    ///
    /// Saturates instead of overflowing; no real rate and day count come
    /// close to `i64::MAX` cents.
    ///
    /// ## Example
    /// ```rust
    /// use reel_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(200).times_days(7).cents(), 1400);
    /// assert_eq!(Money::from_cents(200).times_days(0).cents(), 0);
    /// ```
    #[inline]
    pub const fn times_days(&self, days: i64) -> Self {
        Money(self.0.saturating_mul(days))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// For logs only; clients format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1400).to_string(), "14.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_times_days() {
        let rate = Money::from_cents(250);
        assert_eq!(rate.times_days(3).cents(), 750);
        assert!(rate.times_days(0).is_zero());
        assert_eq!(
            Money::from_cents(i64::MAX).times_days(2).cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_addition() {
        let mut total = Money::from_cents(100) + Money::from_cents(250);
        total += Money::from_cents(50);
        assert_eq!(total.cents(), 400);
        assert!(total.is_positive());
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(1400)).unwrap();
        assert_eq!(json, "1400");
        let back: Money = serde_json::from_str("199").unwrap();
        assert_eq!(back, Money::from_cents(199));
    }
}
