//! Quoting engine for concentrated-liquidity positions.
//!
//! This crate provides:
//! - Slippage guards for deposits and withdrawals
//! - Deposit, increase and withdrawal quotes for a pair snapshot
//! - Pending fee computation from fee-growth accumulators
//! - An indexed registry of the positions in a ledger snapshot
//!
//! Every computation is a pure function of the snapshot it is given.

/// Prelude module for convenient imports.
pub mod prelude;

/// Pending fee computation.
pub mod fees;
/// Quote types returned to the presentation layer.
pub mod quote;
/// Indexed position lookup.
pub mod registry;
/// Slippage guards.
pub mod slippage;
/// Ledger state snapshot.
pub mod snapshot;
/// Position valuation and deposit quoting.
pub mod valuation;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;
