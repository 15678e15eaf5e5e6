//! Fixtures shared by the engine's unit and property tests.

use crate::registry::PositionRegistry;
use clmm_positions_domain::entities::{Pair, PairRecord, Position, PositionRecord, TokenInfo};
use clmm_positions_domain::math::price_tick::sqrt_price_at_tick;
use clmm_positions_domain::value_objects::Address;
use rust_decimal_macros::dec;

pub const PAIR: Address = Address::new([7; 32]);
pub const OWNER: Address = Address::new([3; 32]);
pub const OTHER_OWNER: Address = Address::new([4; 32]);
pub const TICK_SPACING: u16 = 10;

pub fn pair_record_at_tick(tick: i32) -> PairRecord {
    PairRecord {
        address: PAIR,
        token_a: TokenInfo {
            mint: Address::new([8; 32]),
            decimals: 9,
        },
        token_b: TokenInfo {
            mint: Address::new([9; 32]),
            decimals: 6,
        },
        current_sqrt_price: sqrt_price_at_tick(tick).unwrap(),
        tick_spacing: TICK_SPACING,
        fee_rate: dec!(0.003),
        fee_growth_global_a: 0,
        fee_growth_global_b: 0,
    }
}

pub fn pair_at_tick(tick: i32) -> Pair {
    Pair::new(pair_record_at_tick(tick)).unwrap()
}

pub fn pair() -> Pair {
    pair_at_tick(0)
}

pub fn pair_with_growth(fee_growth_global_a: u128, fee_growth_global_b: u128) -> Pair {
    Pair::new(PairRecord {
        fee_growth_global_a,
        fee_growth_global_b,
        ..pair_record_at_tick(0)
    })
    .unwrap()
}

pub fn position_id(n: u8) -> Address {
    Address::new([n; 32])
}

pub fn position_record(id: u8, lower_tick: i32, upper_tick: i32, liquidity: u128) -> PositionRecord {
    PositionRecord {
        id: position_id(id),
        pair: PAIR,
        owner: OWNER,
        lower_tick,
        upper_tick,
        liquidity,
        fee_growth_checkpoint_a: 0,
        fee_growth_checkpoint_b: 0,
    }
}

pub fn position(lower_tick: i32, upper_tick: i32, liquidity: u128) -> Position {
    Position::new(position_record(1, lower_tick, upper_tick, liquidity)).unwrap()
}

pub fn registry_with(pair: Pair, positions: Vec<Position>) -> PositionRegistry {
    PositionRegistry::new(pair, positions).unwrap()
}
