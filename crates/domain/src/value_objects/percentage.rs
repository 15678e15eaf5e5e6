use crate::error::{PositionError, Result};
use crate::math::fixed_point::pow10;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn in_unit_interval(value: Decimal) -> bool {
    value > Decimal::ZERO && value <= Decimal::ONE
}

/// `value` as an exact `numerator / denominator` pair.
fn as_ratio(value: Decimal) -> Result<(u128, u128)> {
    Ok((value.mantissa().unsigned_abs(), pow10(value.scale())?))
}

/// Maximum fractional deviation between a quoted amount and its guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct SlippageTolerance(Decimal);

impl SlippageTolerance {
    /// # Errors
    /// Returns [`PositionError::InvalidTolerance`] unless `0 < value <= 1`.
    pub fn new(value: Decimal) -> Result<Self> {
        if !in_unit_interval(value) {
            return Err(PositionError::InvalidTolerance(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Exact `numerator / denominator` form.
    pub fn ratio(&self) -> Result<(u128, u128)> {
        as_ratio(self.0)
    }
}

impl TryFrom<Decimal> for SlippageTolerance {
    type Error = PositionError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SlippageTolerance> for Decimal {
    fn from(t: SlippageTolerance) -> Self {
        t.0
    }
}

/// Share of a position's liquidity to withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct WithdrawalPercent(Decimal);

impl WithdrawalPercent {
    /// Withdraw everything.
    pub const FULL: Self = Self(Decimal::ONE);

    /// # Errors
    /// Returns [`PositionError::InvalidPercent`] unless `0 < value <= 1`.
    pub fn new(value: Decimal) -> Result<Self> {
        if !in_unit_interval(value) {
            return Err(PositionError::InvalidPercent(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Exact `numerator / denominator` form.
    pub fn ratio(&self) -> Result<(u128, u128)> {
        as_ratio(self.0)
    }
}

impl TryFrom<Decimal> for WithdrawalPercent {
    type Error = PositionError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<WithdrawalPercent> for Decimal {
    fn from(p: WithdrawalPercent) -> Self {
        p.0
    }
}
