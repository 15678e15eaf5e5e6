//! Positions of one pair, indexed by identifier.

use clmm_positions_domain::entities::{Pair, Position};
use clmm_positions_domain::value_objects::Address;
use clmm_positions_domain::{PositionError, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Validated set of positions on a single pair.
///
/// Positions keep the order they had in the snapshot.
#[derive(Debug, Clone)]
pub struct PositionRegistry {
    pair: Pair,
    positions: Vec<Position>,
    index: HashMap<Address, usize>,
}

impl PositionRegistry {
    /// Builds the registry, checking every position against `pair`.
    ///
    /// # Errors
    /// * [`PositionError::PairMismatch`] if a position belongs to another pair.
    /// * [`PositionError::TickNotAligned`] if a range is off the pair's lattice.
    /// * [`PositionError::DuplicatePosition`] if an identifier repeats.
    pub fn new(pair: Pair, positions: Vec<Position>) -> Result<Self> {
        let mut index = HashMap::with_capacity(positions.len());
        for (i, position) in positions.iter().enumerate() {
            if position.pair() != pair.address() {
                warn!(
                    position = %position.id(),
                    position_pair = %position.pair(),
                    pair = %pair.address(),
                    "Position belongs to another pair"
                );
                return Err(PositionError::PairMismatch {
                    position: position.id(),
                    position_pair: position.pair(),
                    pair: pair.address(),
                });
            }
            if let Err(e) = pair.validate_range(&position.range()) {
                warn!(position = %position.id(), error = %e, "Position range rejected");
                return Err(e);
            }
            if index.insert(position.id(), i).is_some() {
                warn!(position = %position.id(), "Duplicate position in snapshot");
                return Err(PositionError::DuplicatePosition(position.id()));
            }
        }
        debug!(pair = %pair.address(), positions = positions.len(), "Registry built");
        Ok(Self {
            pair,
            positions,
            index,
        })
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    /// # Errors
    /// [`PositionError::PositionNotFound`] for an unknown identifier.
    pub fn by_id(&self, id: &Address) -> Result<&Position> {
        self.index
            .get(id)
            .map(|&i| &self.positions[i])
            .ok_or(PositionError::PositionNotFound(*id))
    }

    /// Positions held by `owner`, in snapshot order.
    pub fn by_owner(&self, owner: &Address) -> Vec<&Position> {
        self.positions
            .iter()
            .filter(|p| p.owner() == *owner)
            .collect()
    }

    pub fn all(&self) -> &[Position] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
