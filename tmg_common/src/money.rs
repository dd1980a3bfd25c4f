use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

/// The default commission the marketplace takes on every item, in basis points (20%).
pub const DEFAULT_COMMISSION_BPS: u32 = 2000;

//--------------------------------------       Money         ---------------------------------------------------------
/// An amount of money in cents. All prices, fees and ledger amounts in the gateway are stored in this form, so
/// arithmetic is exact and the database column is a plain integer.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a money amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<u64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(MoneyConversionError(format!("Value {} is too large to convert to Money", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}Rs{}.{:02}", cents / 100, cents % 100)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }
}

//--------------------------------------    CommissionRate    --------------------------------------------------------
/// The marketplace commission policy, expressed in basis points so that it can be configured without floating point.
/// 2000 bps = 20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRate(u32);

impl Default for CommissionRate {
    fn default() -> Self {
        Self(DEFAULT_COMMISSION_BPS)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid commission rate: {0}")]
pub struct InvalidCommissionRate(String);

impl FromStr for CommissionRate {
    type Err = InvalidCommissionRate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bps = s.trim().parse::<u32>().map_err(|e| InvalidCommissionRate(format!("{s}: {e}")))?;
        CommissionRate::new(bps).ok_or_else(|| InvalidCommissionRate(format!("{bps} bps is more than 100%")))
    }
}

impl CommissionRate {
    /// Create a new rate. Rates above 100% are not a thing.
    pub fn new(basis_points: u32) -> Option<Self> {
        (basis_points <= 10_000).then_some(Self(basis_points))
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// The commission owed on `item_price`, rounded to the nearest cent. Any rounding residue of the split stays
    /// with the designer, i.e. `designer_amount = item_price - commission`.
    pub fn commission_on(&self, item_price: Money) -> Money {
        let raw = i128::from(item_price.value()) * i128::from(self.0);
        let commission = (raw + 5_000) / 10_000;
        #[allow(clippy::cast_possible_truncation)]
        Money::from(commission as i64)
    }

    /// Split an item price into `(commission, designer_amount)`. The two always sum back to `item_price`.
    pub fn split(&self, item_price: Money) -> (Money, Money) {
        let commission = self.commission_on(item_price);
        (commission, item_price - commission)
    }
}
