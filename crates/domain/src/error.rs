//! Error taxonomy for position quoting.
//!
//! Every failure is raised at the point of violation and carries the offending
//! value so it can be shown to the user verbatim.

use crate::value_objects::address::Address;
use rust_decimal::Decimal;

/// Errors raised by the position engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Lower tick is not strictly below the upper tick.
    #[error("Invalid range: lower tick {lower} must be below upper tick {upper}")]
    InvalidRange {
        /// Requested lower tick.
        lower: i32,
        /// Requested upper tick.
        upper: i32,
    },
    /// Lower sqrt price is not strictly below the upper one.
    #[error("Invalid range: lower sqrt price {lower} must be below upper sqrt price {upper}")]
    InvalidSqrtRange {
        /// Requested lower sqrt price.
        lower: u128,
        /// Requested upper sqrt price.
        upper: u128,
    },
    /// Tick is not a multiple of the pair's tick spacing.
    #[error("Tick {tick} is not a multiple of tick spacing {tick_spacing}")]
    TickNotAligned {
        /// Offending tick.
        tick: i32,
        /// Spacing of the pair.
        tick_spacing: u16,
    },
    /// The deposit does not supply the asset the range requires.
    #[error("Insufficient input: {0}")]
    InsufficientInput(&'static str),
    /// Slippage tolerance outside (0, 1].
    #[error("Invalid slippage tolerance {0}: expected a value in (0, 1]")]
    InvalidTolerance(Decimal),
    /// Withdrawal percentage outside (0, 1].
    #[error("Invalid percentage {0}: expected a value in (0, 1]")]
    InvalidPercent(Decimal),
    /// No position with this identifier in the snapshot.
    #[error("Position {0} not found")]
    PositionNotFound(Address),
    /// Tick outside the representable bound.
    #[error("Tick {tick} out of range [{min}, {max}]")]
    TickOutOfRange {
        /// Offending tick.
        tick: i32,
        /// Lowest supported tick.
        min: i32,
        /// Highest supported tick.
        max: i32,
    },
    /// Sqrt price outside the representable bound.
    #[error("Sqrt price {0} out of range")]
    SqrtPriceOutOfRange(u128),
    /// Price maps outside the representable tick bound.
    #[error("Price {0} out of range")]
    PriceOutOfRange(Decimal),
    /// Token amount is negative.
    #[error("Invalid amount {0}: amount must not be negative")]
    InvalidAmount(Decimal),
    /// Price is zero or negative.
    #[error("Invalid price {0}: price must be positive")]
    InvalidPrice(Decimal),
    /// Tick spacing must be positive.
    #[error("Invalid tick spacing {0}")]
    InvalidTickSpacing(u16),
    /// Fee rate outside [0, 1).
    #[error("Invalid fee rate {0}: expected a value in [0, 1)")]
    InvalidFeeRate(Decimal),
    /// Token decimals beyond what a decimal price can express.
    #[error("Invalid token decimals {0}")]
    InvalidDecimals(u8),
    /// Address is not a base58 encoded 32-byte key.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// Two positions in a snapshot share an identifier.
    #[error("Duplicate position {0} in snapshot")]
    DuplicatePosition(Address),
    /// Position belongs to a different pair than the one supplied.
    #[error("Position {position} belongs to pair {position_pair}, not {pair}")]
    PairMismatch {
        /// Position identifier.
        position: Address,
        /// Pair recorded on the position.
        position_pair: Address,
        /// Pair the caller supplied.
        pair: Address,
    },
    /// Position fee checkpoint is ahead of the pair's global fee growth.
    #[error("Fee growth checkpoint {checkpoint} is ahead of global fee growth {global}")]
    FeeCheckpointAhead {
        /// Checkpoint recorded on the position.
        checkpoint: u128,
        /// Global fee growth of the pair.
        global: u128,
    },
    /// Intermediate or final value does not fit its integer width.
    #[error("Math overflow: {0}")]
    MathOverflow(&'static str),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PositionError>;
