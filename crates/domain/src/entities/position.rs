use crate::error::Result;
use crate::value_objects::{Address, TickRange};
use serde::{Deserialize, Serialize};

/// Serialized form of a [`Position`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: Address,
    pub pair: Address,
    pub owner: Address,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: u128,
    #[serde(default)]
    pub fee_growth_checkpoint_a: u128,
    #[serde(default)]
    pub fee_growth_checkpoint_b: u128,
}

/// Snapshot of a liquidity position on one pair.
///
/// A position with zero liquidity stays a valid record; it just holds and
/// accrues nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PositionRecord", into = "PositionRecord")]
pub struct Position {
    id: Address,
    pair: Address,
    owner: Address,
    range: TickRange,
    liquidity: u128,
    fee_growth_checkpoint_a: u128,
    fee_growth_checkpoint_b: u128,
}

impl Position {
    /// Validates the tick range; alignment to the pair's spacing is checked
    /// when the position is registered against its pair.
    pub fn new(record: PositionRecord) -> Result<Self> {
        let range = TickRange::new(record.lower_tick, record.upper_tick)?;
        Ok(Self {
            id: record.id,
            pair: record.pair,
            owner: record.owner,
            range,
            liquidity: record.liquidity,
            fee_growth_checkpoint_a: record.fee_growth_checkpoint_a,
            fee_growth_checkpoint_b: record.fee_growth_checkpoint_b,
        })
    }

    pub fn id(&self) -> Address {
        self.id
    }

    pub fn pair(&self) -> Address {
        self.pair
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn range(&self) -> TickRange {
        self.range
    }

    pub fn lower_tick(&self) -> i32 {
        self.range.lower_tick
    }

    pub fn upper_tick(&self) -> i32 {
        self.range.upper_tick
    }

    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    pub fn fee_growth_checkpoint_a(&self) -> u128 {
        self.fee_growth_checkpoint_a
    }

    pub fn fee_growth_checkpoint_b(&self) -> u128 {
        self.fee_growth_checkpoint_b
    }

    pub fn is_closed(&self) -> bool {
        self.liquidity == 0
    }
}

impl TryFrom<PositionRecord> for Position {
    type Error = crate::PositionError;

    fn try_from(record: PositionRecord) -> Result<Self> {
        Self::new(record)
    }
}

impl From<Position> for PositionRecord {
    fn from(p: Position) -> Self {
        Self {
            id: p.id,
            pair: p.pair,
            owner: p.owner,
            lower_tick: p.range.lower_tick,
            upper_tick: p.range.upper_tick,
            liquidity: p.liquidity,
            fee_growth_checkpoint_a: p.fee_growth_checkpoint_a,
            fee_growth_checkpoint_b: p.fee_growth_checkpoint_b,
        }
    }
}
