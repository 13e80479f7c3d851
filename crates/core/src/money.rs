//! Decimal money and tax-rate value objects.
//!
//! All currency arithmetic uses `rust_decimal` fixed-point values. Binary
//! floating point accumulates rounding error across line items and must not
//! be used for amounts or rates.

use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency amount carrying 2 fractional digits.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create an amount, rounding to the 2-decimal currency representation.
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Create an amount from minor units (e.g. cents): `from_minor(1050)` is 10.50.
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a whole quantity. Exact; no rounding occurs.
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0 * Decimal::from(quantity))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Tax rate as a decimal fraction, not a percentage (e.g. 0.1200 for 12%).
///
/// Carries 4 fractional digits, matching the precision the rate is stored at.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub const ZERO: TaxRate = TaxRate(Decimal::ZERO);

    /// Create a rate, rounding to 4 fractional digits.
    pub fn new(rate: Decimal) -> Self {
        Self(rate.round_dp(4))
    }

    /// Create a rate from basis-point-like minor units: `from_minor(1200)` is 0.1200.
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 4))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Tax owed on `amount`, rounded back to the 2-decimal currency representation.
    pub fn apply(&self, amount: Money) -> Money {
        Money::new(amount.amount() * self.0)
    }
}
