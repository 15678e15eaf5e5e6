//! Fees earned by a position since its last checkpoint.
//!
//! Fee growth is a Q64.64 amount of fees per unit of liquidity. A position
//! is owed `floor(L * (global - checkpoint) / 2^64)` of each asset.
//!
//! A checkpoint ahead of the global accumulator is rejected rather than read
//! as a wrapped counter.

use clmm_positions_domain::entities::{Pair, Position};
use clmm_positions_domain::enums::RoundingIntent;
use clmm_positions_domain::math::fixed_point::{Q64, mul_div};
use clmm_positions_domain::value_objects::AmountPair;
use clmm_positions_domain::{PositionError, Result};
use tracing::debug;

/// Fees owed for `liquidity` given the global accumulator and the position's
/// checkpoint. Rounds down.
///
/// # Errors
/// * [`PositionError::FeeCheckpointAhead`] if the checkpoint exceeds the
///   global value.
/// * [`PositionError::MathOverflow`] if the fee exceeds `u64`.
pub fn fee_owed(liquidity: u128, fee_growth_global: u128, fee_growth_checkpoint: u128) -> Result<u64> {
    let growth = fee_growth_global.checked_sub(fee_growth_checkpoint).ok_or(
        PositionError::FeeCheckpointAhead {
            checkpoint: fee_growth_checkpoint,
            global: fee_growth_global,
        },
    )?;
    if liquidity == 0 {
        return Ok(0);
    }
    let owed = mul_div(liquidity, growth, Q64, RoundingIntent::Payout.rounding())?;
    u64::try_from(owed).map_err(|_| PositionError::MathOverflow("pending fee exceeds u64"))
}

/// Unclaimed fees of `position` in both assets.
pub fn pending_fees(position: &Position, pair: &Pair) -> Result<AmountPair> {
    let fees = AmountPair::new(
        fee_owed(
            position.liquidity(),
            pair.fee_growth_global_a(),
            position.fee_growth_checkpoint_a(),
        )?,
        fee_owed(
            position.liquidity(),
            pair.fee_growth_global_b(),
            position.fee_growth_checkpoint_b(),
        )?,
        RoundingIntent::Payout,
    );
    debug!(
        position = %position.id(),
        fee_a = fees.amount_a,
        fee_b = fees.amount_b,
        "Computed pending fees"
    );
    Ok(fees)
}
