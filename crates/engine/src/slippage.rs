//! Worst-case guards around exact quoted amounts.
//!
//! With `s` the caller's tolerance, each asset is bounded independently by
//! `floor(exact * (1 - s))` below and `ceil(exact * (1 + s))` above. A deposit
//! is guarded by the maximum and a withdrawal by the minimum; the other bound
//! is carried for display.

use clmm_positions_domain::enums::RoundingIntent;
use clmm_positions_domain::math::fixed_point::mul_div;
use clmm_positions_domain::value_objects::{AmountPair, SlippageTolerance};
use clmm_positions_domain::{PositionError, Result};
use serde::{Deserialize, Serialize};

/// Which side of the trade the guard protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlippageMode {
    /// Guard is a maximum the user is willing to pay.
    Deposit,
    /// Guard is a minimum the user is willing to receive.
    Withdrawal,
}

/// Exact amounts together with the band the tolerance allows around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedAmounts {
    pub exact: AmountPair,
    /// Rounded down, tagged [`RoundingIntent::Payout`].
    pub minimum: AmountPair,
    /// Rounded up, tagged [`RoundingIntent::Cost`].
    pub maximum: AmountPair,
    pub mode: SlippageMode,
}

impl BoundedAmounts {
    /// The bound the ledger operation enforces for this mode.
    #[must_use]
    pub fn guard(&self) -> AmountPair {
        match self.mode {
            SlippageMode::Deposit => self.maximum,
            SlippageMode::Withdrawal => self.minimum,
        }
    }
}

/// Applies one tolerance to quoted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippageBounder {
    tolerance: SlippageTolerance,
}

impl SlippageBounder {
    pub fn new(tolerance: SlippageTolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> SlippageTolerance {
        self.tolerance
    }

    /// Bounds both amounts of `exact` from below and above.
    ///
    /// # Errors
    /// [`PositionError::MathOverflow`] if a maximum exceeds `u64`.
    pub fn bound(&self, exact: &AmountPair, mode: SlippageMode) -> Result<BoundedAmounts> {
        let (numerator, denominator) = self.tolerance.ratio()?;
        // Tolerance is at most 1, so `denominator - numerator` cannot underflow.
        let (lower, upper) = (denominator - numerator, denominator + numerator);
        let minimum = AmountPair::new(
            scale(exact.amount_a, lower, denominator, RoundingIntent::Payout)?,
            scale(exact.amount_b, lower, denominator, RoundingIntent::Payout)?,
            RoundingIntent::Payout,
        );
        let maximum = AmountPair::new(
            scale(exact.amount_a, upper, denominator, RoundingIntent::Cost)?,
            scale(exact.amount_b, upper, denominator, RoundingIntent::Cost)?,
            RoundingIntent::Cost,
        );
        Ok(BoundedAmounts {
            exact: *exact,
            minimum,
            maximum,
            mode,
        })
    }
}

fn scale(amount: u64, factor: u128, denominator: u128, intent: RoundingIntent) -> Result<u64> {
    let bounded = mul_div(u128::from(amount), factor, denominator, intent.rounding())?;
    u64::try_from(bounded).map_err(|_| PositionError::MathOverflow("slippage maximum exceeds u64"))
}
