//! Monetary amounts using decimal arithmetic.
//!
//! The marketplace trades in a single currency, so an amount is just a
//! [`Decimal`] in the store's standard unit. Computed and persisted values
//! keep full precision; rounding to whole units only happens when an
//! amount is rendered for a shopper.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary amount in the store currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Round to whole currency units for display (midpoint away from zero).
    ///
    /// This is the only place amounts are rounded.
    #[must_use]
    pub fn display_rounded(&self) -> Decimal {
        round_for_display(self.0)
    }
}

/// Round a decimal amount to whole currency units for display.
#[must_use]
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(num: i64, scale: u32) -> Money {
        Money::new(Decimal::new(num, scale))
    }

    #[test]
    fn test_display_rounding_is_half_away_from_zero() {
        assert_eq!(money(725, 1).display_rounded(), Decimal::from(73));
        assert_eq!(money(7249, 2).display_rounded(), Decimal::from(72));
        assert_eq!(money(354, 0).display_rounded(), Decimal::from(354));
    }

    #[test]
    fn test_display_keeps_full_precision() {
        assert_eq!(money(123_456, 4).to_string(), "12.3456");
        assert_eq!(money(47_200, 2).to_string(), "472");
    }

    #[test]
    fn test_negative_detection() {
        assert!(money(-1, 2).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!money(5, 0).is_negative());
    }

    #[test]
    fn test_sum_and_scale() {
        let total: Money = [money(10, 0), money(25, 1)].into_iter().sum();
        assert_eq!(total, money(125, 1));
        assert_eq!(money(40, 0) * Decimal::from(3), money(120, 0));
    }
}
