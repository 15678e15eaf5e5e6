use serde::{Deserialize, Serialize};

/// Direction of an integer division or of a tick snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Towards negative infinity (floor).
    Down,
    /// Towards positive infinity (ceiling).
    Up,
}

/// What an amount is used for, which decides how it rounds.
///
/// Amounts the user pays are rounded up and amounts the user receives are
/// rounded down, so rounding error always stays with the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingIntent {
    /// The user deposits the amount (round up).
    Cost,
    /// The user receives the amount (round down).
    Payout,
}

impl RoundingIntent {
    /// Rounding direction applied to this intent.
    #[must_use]
    pub const fn rounding(self) -> Rounding {
        match self {
            Self::Cost => Rounding::Up,
            Self::Payout => Rounding::Down,
        }
    }
}

/// Where the current price sits relative to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    /// Current price is inside the range; both assets are held.
    InRange,
    /// Current price is below the range; only asset A is held.
    BelowRange,
    /// Current price is at or above the range; only asset B is held.
    AboveRange,
    /// Liquidity has been fully withdrawn.
    Closed,
}
