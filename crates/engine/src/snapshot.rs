//! Ledger state as supplied by an external loader.

use crate::registry::PositionRegistry;
use clmm_positions_domain::Result;
use clmm_positions_domain::entities::{Pair, Position};
use serde::{Deserialize, Serialize};

/// A pair and the positions opened on it, read at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub pair: Pair,
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl LedgerSnapshot {
    /// Validates the positions against the pair and indexes them.
    pub fn into_registry(self) -> Result<PositionRegistry> {
        PositionRegistry::new(self.pair, self.positions)
    }
}
