//! Domain model and exact math for concentrated-liquidity positions.
//!
//! This crate provides:
//! - Value objects (addresses, tick ranges, amounts, tolerances)
//! - Entities (pair state and position snapshots)
//! - Tick/price conversion over Q64.64 sqrt prices
//! - Liquidity math with explicit rounding direction
//! - The error taxonomy shared by every crate in the workspace

/// Entities loaded from ledger snapshots.
pub mod entities;
/// Shared enumerations.
pub mod enums;
/// Error types.
pub mod error;
/// Fixed-point, tick and liquidity math.
pub mod math;
/// Validated value objects.
pub mod value_objects;

pub use error::{PositionError, Result};
