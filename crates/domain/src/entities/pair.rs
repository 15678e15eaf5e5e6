use crate::entities::{Position, TokenInfo};
use crate::enums::PositionStatus;
use crate::error::{PositionError, Result};
use crate::math::price_tick::{
    effective_tick_range, sqrt_price_at_tick, sqrt_price_to_ui_price, tick_at_sqrt_price,
};
use crate::value_objects::{Address, TickRange};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Serialized form of a [`Pair`]. The current tick is not stored; it is
/// derived from the sqrt price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    pub address: Address,
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
    pub current_sqrt_price: u128,
    pub tick_spacing: u16,
    pub fee_rate: Decimal,
    #[serde(default)]
    pub fee_growth_global_a: u128,
    #[serde(default)]
    pub fee_growth_global_b: u128,
}

/// Market state of a concentrated-liquidity pair at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PairRecord", into = "PairRecord")]
pub struct Pair {
    address: Address,
    token_a: TokenInfo,
    token_b: TokenInfo,
    current_sqrt_price: u128,
    current_tick: i32,
    tick_spacing: u16,
    fee_rate: Decimal,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
}

impl Pair {
    /// # Errors
    /// * [`PositionError::InvalidTickSpacing`] for a zero spacing.
    /// * [`PositionError::InvalidFeeRate`] unless `0 <= fee_rate < 1`.
    /// * [`PositionError::SqrtPriceOutOfRange`] if the sqrt price has no tick.
    /// * [`PositionError::InvalidDecimals`] for either token.
    pub fn new(record: PairRecord) -> Result<Self> {
        if record.tick_spacing == 0 {
            return Err(PositionError::InvalidTickSpacing(record.tick_spacing));
        }
        if record.fee_rate < Decimal::ZERO || record.fee_rate >= Decimal::ONE {
            return Err(PositionError::InvalidFeeRate(record.fee_rate));
        }
        record.token_a.validate()?;
        record.token_b.validate()?;
        let current_tick = tick_at_sqrt_price(record.current_sqrt_price)?;

        Ok(Self {
            address: record.address,
            token_a: record.token_a,
            token_b: record.token_b,
            current_sqrt_price: record.current_sqrt_price,
            current_tick,
            tick_spacing: record.tick_spacing,
            fee_rate: record.fee_rate,
            fee_growth_global_a: record.fee_growth_global_a,
            fee_growth_global_b: record.fee_growth_global_b,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn token_a(&self) -> TokenInfo {
        self.token_a
    }

    pub fn token_b(&self) -> TokenInfo {
        self.token_b
    }

    pub fn current_sqrt_price(&self) -> u128 {
        self.current_sqrt_price
    }

    /// Greatest tick whose sqrt price is at most the current sqrt price.
    pub fn current_tick(&self) -> i32 {
        self.current_tick
    }

    pub fn tick_spacing(&self) -> u16 {
        self.tick_spacing
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    pub fn fee_growth_global_a(&self) -> u128 {
        self.fee_growth_global_a
    }

    pub fn fee_growth_global_b(&self) -> u128 {
        self.fee_growth_global_b
    }

    /// Current UI price of A in units of B.
    pub fn current_price(&self) -> Result<Decimal> {
        sqrt_price_to_ui_price(
            self.current_sqrt_price,
            self.token_a.decimals,
            self.token_b.decimals,
        )
    }

    /// UI price at `tick` for this pair's tokens.
    pub fn price_at_tick(&self, tick: i32) -> Result<Decimal> {
        sqrt_price_to_ui_price(
            sqrt_price_at_tick(tick)?,
            self.token_a.decimals,
            self.token_b.decimals,
        )
    }

    /// Aligned tick range covering `[lower_price, upper_price]`.
    pub fn effective_tick_range(
        &self,
        lower_price: Decimal,
        upper_price: Decimal,
    ) -> Result<TickRange> {
        effective_tick_range(
            lower_price,
            upper_price,
            self.token_a.decimals,
            self.token_b.decimals,
            self.tick_spacing,
        )
    }

    /// Checks that `range` sits on this pair's tick lattice.
    pub fn validate_range(&self, range: &TickRange) -> Result<()> {
        range.ensure_aligned(self.tick_spacing)
    }

    /// Where the current price sits relative to `position`.
    ///
    /// At the lower bound the position holds only asset A, so it counts as
    /// below range; at the upper bound it holds only B.
    pub fn status_of(&self, position: &Position) -> Result<PositionStatus> {
        if position.is_closed() {
            return Ok(PositionStatus::Closed);
        }
        let lower = sqrt_price_at_tick(position.lower_tick())?;
        let upper = sqrt_price_at_tick(position.upper_tick())?;
        Ok(if self.current_sqrt_price <= lower {
            PositionStatus::BelowRange
        } else if self.current_sqrt_price >= upper {
            PositionStatus::AboveRange
        } else {
            PositionStatus::InRange
        })
    }
}

impl TryFrom<PairRecord> for Pair {
    type Error = PositionError;

    fn try_from(record: PairRecord) -> Result<Self> {
        Self::new(record)
    }
}

impl From<Pair> for PairRecord {
    fn from(p: Pair) -> Self {
        Self {
            address: p.address,
            token_a: p.token_a,
            token_b: p.token_b,
            current_sqrt_price: p.current_sqrt_price,
            tick_spacing: p.tick_spacing,
            fee_rate: p.fee_rate,
            fee_growth_global_a: p.fee_growth_global_a,
            fee_growth_global_b: p.fee_growth_global_b,
        }
    }
}
