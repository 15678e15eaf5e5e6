/// Liquidity and amount formulas.
pub mod concentrated_liquidity;
/// Q64.64 helpers over wide integers.
pub mod fixed_point;
/// Tick, sqrt price and UI price conversions.
pub mod price_tick;
