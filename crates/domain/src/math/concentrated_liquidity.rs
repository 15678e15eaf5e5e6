//! Liquidity <-> token amount conversions for a single price range.
//!
//! With `L` the liquidity and `pl < pu` the Q64.64 sqrt prices bounding an
//! interval:
//!
//! - `amount_a = L * (pu - pl) * 2^64 / (pu * pl)`
//! - `amount_b = L * (pu - pl) / 2^64`
//!
//! Amounts take a [`RoundingIntent`]; liquidity derived from amounts always
//! rounds down.

use crate::enums::RoundingIntent;
use crate::error::{PositionError, Result};
use crate::math::fixed_point::{Q64_RESOLUTION, div_rounding, mul, to_u64, to_u128};
use crate::value_objects::{AmountPair, DepositAmounts};
use primitive_types::U512;

fn ensure_ordered(lower_sqrt_price: u128, upper_sqrt_price: u128) -> Result<()> {
    if lower_sqrt_price > upper_sqrt_price {
        return Err(PositionError::InvalidSqrtRange {
            lower: lower_sqrt_price,
            upper: upper_sqrt_price,
        });
    }
    Ok(())
}

fn ensure_strictly_ordered(lower_sqrt_price: u128, upper_sqrt_price: u128) -> Result<()> {
    if lower_sqrt_price >= upper_sqrt_price {
        return Err(PositionError::InvalidSqrtRange {
            lower: lower_sqrt_price,
            upper: upper_sqrt_price,
        });
    }
    Ok(())
}

/// Amount of asset A spanned by `liquidity` between two sqrt prices.
pub fn amount_a_delta(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    intent: RoundingIntent,
) -> Result<u64> {
    ensure_ordered(lower_sqrt_price, upper_sqrt_price)?;
    if liquidity == 0 || lower_sqrt_price == upper_sqrt_price {
        return Ok(0);
    }
    let diff = U512::from(upper_sqrt_price - lower_sqrt_price);
    let numerator = mul(U512::from(liquidity), diff)? << Q64_RESOLUTION;
    let denominator = mul(U512::from(upper_sqrt_price), U512::from(lower_sqrt_price))?;
    to_u64(div_rounding(numerator, denominator, intent.rounding())?)
}

/// Amount of asset B spanned by `liquidity` between two sqrt prices.
pub fn amount_b_delta(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    intent: RoundingIntent,
) -> Result<u64> {
    ensure_ordered(lower_sqrt_price, upper_sqrt_price)?;
    let diff = U512::from(upper_sqrt_price - lower_sqrt_price);
    let numerator = mul(U512::from(liquidity), diff)?;
    let denominator = U512::one() << Q64_RESOLUTION;
    to_u64(div_rounding(numerator, denominator, intent.rounding())?)
}

/// Largest liquidity whose asset A requirement over the interval is at most
/// `amount_a`.
pub fn liquidity_from_amount_a(
    amount_a: u64,
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
) -> Result<u128> {
    ensure_strictly_ordered(lower_sqrt_price, upper_sqrt_price)?;
    let product = mul(
        mul(U512::from(amount_a), U512::from(lower_sqrt_price))?,
        U512::from(upper_sqrt_price),
    )?;
    let denominator = U512::from(upper_sqrt_price - lower_sqrt_price) << Q64_RESOLUTION;
    to_u128(product / denominator)
}

/// Largest liquidity whose asset B requirement over the interval is at most
/// `amount_b`.
pub fn liquidity_from_amount_b(
    amount_b: u64,
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
) -> Result<u128> {
    ensure_strictly_ordered(lower_sqrt_price, upper_sqrt_price)?;
    let numerator = U512::from(amount_b) << Q64_RESOLUTION;
    to_u128(numerator / U512::from(upper_sqrt_price - lower_sqrt_price))
}

/// Liquidity obtainable from a deposit into `[lower, upper)` at the current
/// price.
///
/// Below the range only asset A is used, at or above it only asset B. Inside
/// the range A covers `[current, upper]` and B covers `[lower, current]`; when
/// both are offered the scarcer side bounds the result.
///
/// # Errors
/// * [`PositionError::InvalidSqrtRange`] unless `lower_sqrt_price < upper_sqrt_price`.
/// * [`PositionError::InsufficientInput`] if only the asset that does not
///   participate at the current price is offered.
pub fn calculate_liquidity(
    deposit: DepositAmounts,
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    current_sqrt_price: u128,
) -> Result<u128> {
    ensure_strictly_ordered(lower_sqrt_price, upper_sqrt_price)?;

    if current_sqrt_price <= lower_sqrt_price {
        let amount_a = deposit.amount_a().ok_or(PositionError::InsufficientInput(
            "asset A is required while the price is below the range",
        ))?;
        return liquidity_from_amount_a(amount_a, lower_sqrt_price, upper_sqrt_price);
    }
    if current_sqrt_price >= upper_sqrt_price {
        let amount_b = deposit.amount_b().ok_or(PositionError::InsufficientInput(
            "asset B is required while the price is above the range",
        ))?;
        return liquidity_from_amount_b(amount_b, lower_sqrt_price, upper_sqrt_price);
    }

    match deposit {
        DepositAmounts::A(amount_a) => {
            liquidity_from_amount_a(amount_a, current_sqrt_price, upper_sqrt_price)
        }
        DepositAmounts::B(amount_b) => {
            liquidity_from_amount_b(amount_b, lower_sqrt_price, current_sqrt_price)
        }
        DepositAmounts::Both { amount_a, amount_b } => {
            let from_a = liquidity_from_amount_a(amount_a, current_sqrt_price, upper_sqrt_price)?;
            let from_b = liquidity_from_amount_b(amount_b, lower_sqrt_price, current_sqrt_price)?;
            Ok(from_a.min(from_b))
        }
    }
}

/// Token amounts represented by `liquidity` in `[lower, upper)` at the
/// current price. Sides that do not participate are exactly zero.
pub fn amounts_for_liquidity(
    liquidity: u128,
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    current_sqrt_price: u128,
    intent: RoundingIntent,
) -> Result<AmountPair> {
    ensure_strictly_ordered(lower_sqrt_price, upper_sqrt_price)?;

    let (amount_a, amount_b) = if current_sqrt_price <= lower_sqrt_price {
        (
            amount_a_delta(lower_sqrt_price, upper_sqrt_price, liquidity, intent)?,
            0,
        )
    } else if current_sqrt_price >= upper_sqrt_price {
        (
            0,
            amount_b_delta(lower_sqrt_price, upper_sqrt_price, liquidity, intent)?,
        )
    } else {
        (
            amount_a_delta(current_sqrt_price, upper_sqrt_price, liquidity, intent)?,
            amount_b_delta(lower_sqrt_price, current_sqrt_price, liquidity, intent)?,
        )
    };
    Ok(AmountPair::new(amount_a, amount_b, intent))
}
