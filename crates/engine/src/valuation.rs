//! Quotes for depositing into and withdrawing from positions.

use crate::fees::pending_fees;
use crate::quote::{DepositQuote, PositionDetails, WithdrawalQuote};
use crate::registry::PositionRegistry;
use crate::slippage::{SlippageBounder, SlippageMode};
use clmm_positions_domain::Result;
use clmm_positions_domain::entities::{Pair, Position};
use clmm_positions_domain::enums::{Rounding, RoundingIntent};
use clmm_positions_domain::math::concentrated_liquidity::{
    amounts_for_liquidity, calculate_liquidity,
};
use clmm_positions_domain::math::fixed_point::mul_div;
use clmm_positions_domain::math::price_tick::sqrt_price_at_tick;
use clmm_positions_domain::value_objects::{
    Address, AmountPair, DepositAmounts, SlippageTolerance, TickRange, WithdrawalPercent,
};
use rust_decimal::Decimal;
use tracing::debug;

/// Read-only view over a registry that prices deposits and withdrawals at
/// the pair's current sqrt price.
#[derive(Debug, Clone, Copy)]
pub struct PositionValuation<'a> {
    registry: &'a PositionRegistry,
}

impl<'a> PositionValuation<'a> {
    pub fn new(registry: &'a PositionRegistry) -> Self {
        Self { registry }
    }

    pub fn pair(&self) -> &'a Pair {
        self.registry.pair()
    }

    /// Quotes removing `percent` of a position's liquidity.
    ///
    /// The liquidity removed is `floor(L * percent)`, so a full withdrawal
    /// removes exactly `L`.
    ///
    /// # Errors
    /// [`clmm_positions_domain::PositionError::PositionNotFound`] for an
    /// unknown identifier.
    pub fn value_for_withdrawal(
        &self,
        id: &Address,
        percent: WithdrawalPercent,
        tolerance: SlippageTolerance,
    ) -> Result<WithdrawalQuote> {
        let position = self.registry.by_id(id)?;
        let (numerator, denominator) = percent.ratio()?;
        let liquidity_to_remove =
            mul_div(position.liquidity(), numerator, denominator, Rounding::Down)?;

        let amounts = self.amounts_in_range(
            &position.range(),
            liquidity_to_remove,
            RoundingIntent::Payout,
        )?;
        let bounded = SlippageBounder::new(tolerance).bound(&amounts, SlippageMode::Withdrawal)?;

        let quote = WithdrawalQuote {
            position_id: *id,
            liquidity_to_remove,
            amounts: bounded.exact,
            min_amounts: bounded.guard(),
            max_amounts: bounded.maximum,
        };
        debug!(
            position = %id,
            percent = %percent.value(),
            liquidity = quote.liquidity_to_remove,
            min_a = quote.min_amounts.amount_a,
            min_b = quote.min_amounts.amount_b,
            "Withdrawal quoted"
        );
        Ok(quote)
    }

    /// Quotes opening a new position over an aligned `range`.
    ///
    /// # Errors
    /// * `TickNotAligned` if the range is off the pair's lattice.
    /// * `InsufficientInput` if the offered asset does not participate at the
    ///   current price.
    pub fn quote_deposit(
        &self,
        range: TickRange,
        deposit: DepositAmounts,
        tolerance: SlippageTolerance,
    ) -> Result<DepositQuote> {
        self.pair().validate_range(&range)?;
        let (lower, upper) = sqrt_bounds(&range)?;
        let liquidity = calculate_liquidity(deposit, lower, upper, self.pair().current_sqrt_price())?;
        let amounts = self.amounts_in_range(&range, liquidity, RoundingIntent::Cost)?;
        let bounded = SlippageBounder::new(tolerance).bound(&amounts, SlippageMode::Deposit)?;

        let quote = DepositQuote {
            range,
            liquidity,
            amounts: bounded.exact,
            max_amounts: bounded.guard(),
            min_amounts: bounded.minimum,
        };
        debug!(
            lower_tick = range.lower_tick,
            upper_tick = range.upper_tick,
            liquidity = quote.liquidity,
            max_a = quote.max_amounts.amount_a,
            max_b = quote.max_amounts.amount_b,
            "Deposit quoted"
        );
        Ok(quote)
    }

    /// Quotes opening a position between two UI prices. The lower price
    /// rounds down to the lattice and the upper price rounds up.
    pub fn quote_deposit_at_prices(
        &self,
        lower_price: Decimal,
        upper_price: Decimal,
        deposit: DepositAmounts,
        tolerance: SlippageTolerance,
    ) -> Result<DepositQuote> {
        let range = self.pair().effective_tick_range(lower_price, upper_price)?;
        self.quote_deposit(range, deposit, tolerance)
    }

    /// Quotes adding liquidity to an existing position's range.
    pub fn quote_increase(
        &self,
        id: &Address,
        deposit: DepositAmounts,
        tolerance: SlippageTolerance,
    ) -> Result<DepositQuote> {
        let position = self.registry.by_id(id)?;
        self.quote_deposit(position.range(), deposit, tolerance)
    }

    /// What the whole position would pay out at the current price.
    pub fn position_amounts(&self, position: &Position) -> Result<AmountPair> {
        self.amounts_in_range(
            &position.range(),
            position.liquidity(),
            RoundingIntent::Payout,
        )
    }

    pub fn position_details(&self, id: &Address) -> Result<PositionDetails> {
        let position = self.registry.by_id(id)?;
        let pair = self.pair();
        Ok(PositionDetails {
            position: position.clone(),
            status: pair.status_of(position)?,
            lower_price: pair.price_at_tick(position.lower_tick())?,
            upper_price: pair.price_at_tick(position.upper_tick())?,
            current_price: pair.current_price()?,
            amounts: self.position_amounts(position)?,
            pending_fees: pending_fees(position, pair)?,
        })
    }

    fn amounts_in_range(
        &self,
        range: &TickRange,
        liquidity: u128,
        intent: RoundingIntent,
    ) -> Result<AmountPair> {
        let (lower, upper) = sqrt_bounds(range)?;
        amounts_for_liquidity(
            liquidity,
            lower,
            upper,
            self.pair().current_sqrt_price(),
            intent,
        )
    }
}

fn sqrt_bounds(range: &TickRange) -> Result<(u128, u128)> {
    Ok((
        sqrt_price_at_tick(range.lower_tick)?,
        sqrt_price_at_tick(range.upper_tick)?,
    ))
}
