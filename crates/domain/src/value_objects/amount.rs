use crate::enums::{Rounding, RoundingIntent};
use crate::error::{PositionError, Result};
use crate::math::fixed_point::{mul_div, pow10};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest decimals value a `Decimal` scale can represent.
pub const MAX_DECIMALS: u8 = 28;

/// A raw token amount together with its mint decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAmount {
    /// Amount in the mint's smallest unit.
    pub raw: u64,
    /// Decimals of the mint, at most [`MAX_DECIMALS`].
    pub decimals: u8,
}

impl TokenAmount {
    /// # Errors
    /// [`PositionError::InvalidDecimals`] if `decimals` exceeds [`MAX_DECIMALS`].
    pub fn new(raw: u64, decimals: u8) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(PositionError::InvalidDecimals(decimals));
        }
        Ok(Self { raw, decimals })
    }

    /// Converts a UI amount into raw units, rounding down.
    pub fn from_decimal(d: Decimal, decimals: u8) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(PositionError::InvalidDecimals(decimals));
        }
        if d.is_sign_negative() && !d.is_zero() {
            return Err(PositionError::InvalidAmount(d));
        }
        let mantissa = d.mantissa().unsigned_abs();
        let raw = mul_div(
            mantissa,
            pow10(u32::from(decimals))?,
            pow10(d.scale())?,
            Rounding::Down,
        )?;
        let raw = u64::try_from(raw)
            .map_err(|_| PositionError::MathOverflow("token amount exceeds u64"))?;
        Ok(Self { raw, decimals })
    }

    /// Converts raw units into a UI amount. Exact.
    pub fn to_decimal(&self) -> Result<Decimal> {
        Decimal::try_from_i128_with_scale(i128::from(self.raw), u32::from(self.decimals))
            .map_err(|_| PositionError::InvalidDecimals(self.decimals))
    }
}

/// Raw amounts of both assets, tagged with how they were rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPair {
    pub amount_a: u64,
    pub amount_b: u64,
    pub rounding: RoundingIntent,
}

impl AmountPair {
    #[must_use]
    pub const fn new(amount_a: u64, amount_b: u64, rounding: RoundingIntent) -> Self {
        Self {
            amount_a,
            amount_b,
            rounding,
        }
    }

    #[must_use]
    pub const fn zero(rounding: RoundingIntent) -> Self {
        Self::new(0, 0, rounding)
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_a == 0 && self.amount_b == 0
    }
}

/// Desired deposit: one asset, the other, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositAmounts {
    /// Only asset A is offered.
    A(u64),
    /// Only asset B is offered.
    B(u64),
    /// Both assets are offered; the scarcer one bounds the liquidity.
    Both { amount_a: u64, amount_b: u64 },
}

impl DepositAmounts {
    /// Builds the tagged choice from two optional amounts.
    ///
    /// # Errors
    /// Returns [`PositionError::InsufficientInput`] when both are absent.
    pub fn from_options(amount_a: Option<u64>, amount_b: Option<u64>) -> Result<Self> {
        match (amount_a, amount_b) {
            (Some(amount_a), Some(amount_b)) => Ok(Self::Both { amount_a, amount_b }),
            (Some(a), None) => Ok(Self::A(a)),
            (None, Some(b)) => Ok(Self::B(b)),
            (None, None) => Err(PositionError::InsufficientInput(
                "at least one of amount A or amount B is required",
            )),
        }
    }

    #[must_use]
    pub const fn amount_a(&self) -> Option<u64> {
        match self {
            Self::A(a) | Self::Both { amount_a: a, .. } => Some(*a),
            Self::B(_) => None,
        }
    }

    #[must_use]
    pub const fn amount_b(&self) -> Option<u64> {
        match self {
            Self::B(b) | Self::Both { amount_b: b, .. } => Some(*b),
            Self::A(_) => None,
        }
    }
}
