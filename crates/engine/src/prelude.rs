//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_positions_engine::prelude::*;
//! ```

// Engine
pub use crate::fees::{fee_owed, pending_fees};
pub use crate::quote::{DepositQuote, PositionDetails, WithdrawalQuote};
pub use crate::registry::PositionRegistry;
pub use crate::slippage::{BoundedAmounts, SlippageBounder, SlippageMode};
pub use crate::snapshot::LedgerSnapshot;
pub use crate::valuation::PositionValuation;

// Domain
pub use clmm_positions_domain::entities::{Pair, PairRecord, Position, PositionRecord, TokenInfo};
pub use clmm_positions_domain::enums::{PositionStatus, Rounding, RoundingIntent};
pub use clmm_positions_domain::value_objects::{
    Address, AmountPair, DepositAmounts, SlippageTolerance, TickRange, TokenAmount, WithdrawalPercent,
};
pub use clmm_positions_domain::{PositionError, Result};
