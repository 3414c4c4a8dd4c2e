use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Signed monetary amount. Positive is an inflow, negative an outflow,
/// matching the sign convention of the transaction store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents) / Decimal::from(100))
    }

    pub fn to_cents(self) -> i64 {
        (self.0 * Decimal::from(100)).round().to_i64().unwrap_or(0)
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// The inflow portion: the amount itself when positive, else zero.
    pub fn inflow(self) -> Money {
        if self.0.is_sign_positive() && !self.0.is_zero() {
            self
        } else {
            Money::zero()
        }
    }

    /// The outflow portion: the magnitude when negative, else zero.
    pub fn outflow(self) -> Money {
        if self.0.is_sign_negative() {
            Money(self.0.abs())
        } else {
            Money::zero()
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_round_trip() {
        assert_eq!(Money::from_cents(4999).to_cents(), 4999);
        assert_eq!(Money::from_cents(-500).to_cents(), -500);
    }

    #[test]
    fn positive_amount_splits_to_inflow() {
        let m = Money::from_cents(4999);
        assert_eq!(m.inflow(), Money::from_cents(4999));
        assert_eq!(m.outflow(), Money::zero());
    }

    #[test]
    fn negative_amount_splits_to_outflow() {
        let m = Money::from_cents(-500);
        assert_eq!(m.inflow(), Money::zero());
        assert_eq!(m.outflow(), Money::from_cents(500));
    }

    #[test]
    fn zero_splits_to_neither() {
        assert_eq!(Money::zero().inflow(), Money::zero());
        assert_eq!(Money::zero().outflow(), Money::zero());
    }

    #[test]
    fn display_two_decimal_places() {
        assert_eq!(Money::from_cents(4999).to_string(), "$49.99");
    }
}
