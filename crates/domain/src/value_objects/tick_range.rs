use crate::error::{PositionError, Result};
use crate::math::price_tick::{MAX_TICK, MIN_TICK};
use serde::{Deserialize, Serialize};

/// Tick bounds `[lower_tick, upper_tick)` of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    pub lower_tick: i32,
    pub upper_tick: i32,
}

impl TickRange {
    /// # Errors
    /// * [`PositionError::InvalidRange`] unless `lower_tick < upper_tick`,
    ///   checked before anything else.
    /// * [`PositionError::TickOutOfRange`] if either bound leaves the tick domain.
    pub fn new(lower_tick: i32, upper_tick: i32) -> Result<Self> {
        if lower_tick >= upper_tick {
            return Err(PositionError::InvalidRange {
                lower: lower_tick,
                upper: upper_tick,
            });
        }
        for tick in [lower_tick, upper_tick] {
            if !(MIN_TICK..=MAX_TICK).contains(&tick) {
                return Err(PositionError::TickOutOfRange {
                    tick,
                    min: MIN_TICK,
                    max: MAX_TICK,
                });
            }
        }
        Ok(Self {
            lower_tick,
            upper_tick,
        })
    }

    /// Checks that both bounds are multiples of `tick_spacing`.
    pub fn ensure_aligned(&self, tick_spacing: u16) -> Result<()> {
        if tick_spacing == 0 {
            return Err(PositionError::InvalidTickSpacing(tick_spacing));
        }
        let spacing = i32::from(tick_spacing);
        for tick in [self.lower_tick, self.upper_tick] {
            if tick % spacing != 0 {
                return Err(PositionError::TickNotAligned { tick, tick_spacing });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_and_empty() {
        assert!(TickRange::new(-10, 10).is_ok());
        assert_eq!(
            TickRange::new(10, 10),
            Err(PositionError::InvalidRange {
                lower: 10,
                upper: 10
            })
        );
        assert!(matches!(
            TickRange::new(20, -20),
            Err(PositionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert!(matches!(
            TickRange::new(MIN_TICK - 1, 0),
            Err(PositionError::TickOutOfRange { tick, .. }) if tick == MIN_TICK - 1
        ));
        assert!(TickRange::new(MIN_TICK, MAX_TICK).is_ok());
    }

    #[test]
    fn test_inverted_wins_over_out_of_bounds() {
        assert_eq!(
            TickRange::new(500_000, 0),
            Err(PositionError::InvalidRange {
                lower: 500_000,
                upper: 0
            })
        );
        assert!(matches!(
            TickRange::new(0, MIN_TICK - 1),
            Err(PositionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_alignment() {
        let range = TickRange::new(-128, 64).unwrap();
        assert!(range.ensure_aligned(64).is_ok());
        assert_eq!(
            range.ensure_aligned(100),
            Err(PositionError::TickNotAligned {
                tick: -128,
                tick_spacing: 100
            })
        );
        assert!(range.ensure_aligned(0).is_err());
    }
}
