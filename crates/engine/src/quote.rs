//! Results handed to the presentation layer and, from there, to whatever
//! builds and submits the ledger operation.

use clmm_positions_domain::entities::Position;
use clmm_positions_domain::enums::PositionStatus;
use clmm_positions_domain::value_objects::{Address, AmountPair, TickRange};
use rust_decimal::Decimal;
use serde::Serialize;

/// Liquidity and bounded costs for opening or topping up a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepositQuote {
    pub range: TickRange,
    pub liquidity: u128,
    /// Exact cost, rounded up.
    pub amounts: AmountPair,
    /// Most the operation may take from the user.
    pub max_amounts: AmountPair,
    /// Lower edge of the tolerance band, shown alongside the maximum.
    pub min_amounts: AmountPair,
}

/// Liquidity to remove and bounded payouts for a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithdrawalQuote {
    pub position_id: Address,
    pub liquidity_to_remove: u128,
    /// Exact payout, rounded down.
    pub amounts: AmountPair,
    /// Least the operation must pay the user.
    pub min_amounts: AmountPair,
    /// Upper edge of the tolerance band, shown alongside the minimum.
    pub max_amounts: AmountPair,
}

/// Everything shown for a single position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionDetails {
    pub position: Position,
    pub status: PositionStatus,
    pub lower_price: Decimal,
    pub upper_price: Decimal,
    pub current_price: Decimal,
    pub amounts: AmountPair,
    pub pending_fees: AmountPair,
}
