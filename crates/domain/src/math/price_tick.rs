//! Conversions between ticks, Q64.64 sqrt prices and UI prices.
//!
//! A tick `t` identifies the price `1.0001^t` of asset A in units of asset B.
//! Sqrt prices are `sqrt(price) * 2^64` stored in a `u128`.
//!
//! The forward map [`sqrt_price_at_tick`] is exact integer arithmetic over
//! precomputed `sqrt(1.0001)^(2^i)` factors in Q128, so the inverse can be a
//! binary search and the round trip `tick -> sqrt -> tick` is the identity.

use crate::enums::Rounding;
use crate::error::{PositionError, Result};
use crate::math::fixed_point::{integer_sqrt, mul, pow10, to_u128};
use crate::value_objects::TickRange;
use primitive_types::{U256, U512};
use rust_decimal::Decimal;

/// Lowest supported tick.
pub const MIN_TICK: i32 = -443_636;
/// Highest supported tick.
pub const MAX_TICK: i32 = 443_636;

/// `sqrt_price_at_tick(MIN_TICK)`.
pub const MIN_SQRT_PRICE: u128 = 4_295_048_017;
/// `sqrt_price_at_tick(MAX_TICK)`.
pub const MAX_SQRT_PRICE: u128 = 79_226_673_515_401_279_992_447_579_062;

/// Largest scale a `Decimal` accepts.
const MAX_DECIMAL_SCALE: u32 = 28;

/// `sqrt(1.0001)^-(2^i)` in Q128 for `i` in `0..19`.
const TICK_FACTORS: [u128; 19] = [
    0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001,
    0xfff9_7272_373d_4132_59a4_6990_580e_213a,
    0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc,
    0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0,
    0xffcb_9843_d60f_6159_c9db_5883_5c92_6644,
    0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0,
    0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861,
    0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053,
    0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4,
    0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54,
    0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3,
    0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9,
    0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825,
    0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5,
    0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7,
    0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6,
    0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9,
    0x005d_6af8_dedb_8119_6699_c329_225e_e604,
    0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98,
];

fn check_tick(tick: i32) -> Result<()> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(PositionError::TickOutOfRange {
            tick,
            min: MIN_TICK,
            max: MAX_TICK,
        });
    }
    Ok(())
}

/// Q64.64 sqrt price at `tick`, rounded up.
///
/// Strictly increasing in `tick`; `sqrt_price_at_tick(0) == 2^64`.
///
/// # Errors
/// [`PositionError::TickOutOfRange`] outside `[MIN_TICK, MAX_TICK]`.
pub fn sqrt_price_at_tick(tick: i32) -> Result<u128> {
    check_tick(tick)?;
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from(TICK_FACTORS[0])
    } else {
        U256::one() << 128u32
    };
    for (bit, factor) in TICK_FACTORS.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            ratio = (ratio * U256::from(*factor)) >> 128u32;
        }
    }
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q64, rounding up so the result never understates the price.
    let remainder = ratio & U256::from(u64::MAX);
    let mut sqrt_price = ratio >> 64u32;
    if !remainder.is_zero() {
        sqrt_price = sqrt_price + U256::one();
    }
    if sqrt_price > U256::from(u128::MAX) {
        return Err(PositionError::MathOverflow("sqrt price exceeds u128"));
    }
    Ok(sqrt_price.low_u128())
}

/// Greatest tick whose sqrt price is `<= sqrt_price`.
///
/// # Errors
/// [`PositionError::SqrtPriceOutOfRange`] outside
/// `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`.
pub fn tick_at_sqrt_price(sqrt_price: u128) -> Result<i32> {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return Err(PositionError::SqrtPriceOutOfRange(sqrt_price));
    }
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if sqrt_price_at_tick(mid)? <= sqrt_price {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}

/// Rounds `tick` to a multiple of `tick_spacing` in the given direction.
///
/// # Errors
/// * [`PositionError::InvalidTickSpacing`] if `tick_spacing == 0`.
/// * [`PositionError::TickOutOfRange`] if the multiple leaves the tick domain.
pub fn align_tick(tick: i32, tick_spacing: u16, rounding: Rounding) -> Result<i32> {
    if tick_spacing == 0 {
        return Err(PositionError::InvalidTickSpacing(tick_spacing));
    }
    let spacing = i64::from(tick_spacing);
    let tick = i64::from(tick);
    let floor = tick.div_euclid(spacing) * spacing;
    let aligned = match rounding {
        Rounding::Down => floor,
        Rounding::Up if floor == tick => floor,
        Rounding::Up => floor + spacing,
    };
    if aligned < i64::from(MIN_TICK) || aligned > i64::from(MAX_TICK) {
        return Err(PositionError::TickOutOfRange {
            tick: aligned.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            min: MIN_TICK,
            max: MAX_TICK,
        });
    }
    // Within [MIN_TICK, MAX_TICK], so the narrowing is lossless.
    Ok(aligned as i32)
}

/// Snaps a sqrt price onto the tick lattice.
///
/// `Down` gives the greatest multiple of `tick_spacing` whose sqrt price is
/// `<= sqrt_price`, `Up` the smallest whose sqrt price is `>= sqrt_price`.
pub fn sqrt_price_to_aligned_tick(
    sqrt_price: u128,
    tick_spacing: u16,
    rounding: Rounding,
) -> Result<i32> {
    let tick = tick_at_sqrt_price(sqrt_price)?;
    match rounding {
        Rounding::Down => align_tick(tick, tick_spacing, Rounding::Down),
        Rounding::Up if sqrt_price_at_tick(tick)? == sqrt_price => {
            align_tick(tick, tick_spacing, Rounding::Up)
        }
        // sqrt_price sits strictly above `tick`, so `tick` itself is too low.
        Rounding::Up => align_tick(tick + 1, tick_spacing, Rounding::Up),
    }
}

/// Converts a UI price (B per A, in whole tokens) into a Q64.64 sqrt price.
///
/// The result is the floor of the exact square root of the raw price.
///
/// # Errors
/// * [`PositionError::InvalidPrice`] for zero or negative prices.
/// * [`PositionError::PriceOutOfRange`] if the sqrt price falls outside
///   `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`.
pub fn price_to_sqrt_price(price: Decimal, decimals_a: u8, decimals_b: u8) -> Result<u128> {
    if price <= Decimal::ZERO {
        return Err(PositionError::InvalidPrice(price));
    }
    check_decimals(decimals_a)?;
    check_decimals(decimals_b)?;

    // raw = mantissa * 10^decimals_b / (10^scale * 10^decimals_a)
    let numerator = mul(
        U512::from(price.mantissa().unsigned_abs()),
        U512::from(pow10(u32::from(decimals_b))?),
    )?;
    let denominator = mul(
        U512::from(pow10(price.scale())?),
        U512::from(pow10(u32::from(decimals_a))?),
    )?;
    let radicand = (numerator << 128u32) / denominator;
    let sqrt_price = integer_sqrt(radicand);

    if sqrt_price < U512::from(MIN_SQRT_PRICE) || sqrt_price > U512::from(MAX_SQRT_PRICE) {
        return Err(PositionError::PriceOutOfRange(price));
    }
    to_u128(sqrt_price)
}

/// UI price to an aligned tick, rounding in the given direction.
pub fn price_to_tick(
    price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
    tick_spacing: u16,
    rounding: Rounding,
) -> Result<i32> {
    let sqrt_price = price_to_sqrt_price(price, decimals_a, decimals_b)?;
    sqrt_price_to_aligned_tick(sqrt_price, tick_spacing, rounding)
}

/// Resolves a UI price interval into the widest aligned tick range inside
/// which both prices fall: the lower bound rounds down, the upper rounds up.
///
/// # Errors
/// [`PositionError::InvalidRange`] when both prices snap to the same tick or
/// the interval is inverted.
pub fn effective_tick_range(
    lower_price: Decimal,
    upper_price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
    tick_spacing: u16,
) -> Result<TickRange> {
    let lower = price_to_tick(lower_price, decimals_a, decimals_b, tick_spacing, Rounding::Down)?;
    let upper = price_to_tick(upper_price, decimals_a, decimals_b, tick_spacing, Rounding::Up)?;
    TickRange::new(lower, upper)
}

/// Converts a Q64.64 sqrt price into a UI price for display.
///
/// The value is truncated at the largest scale a `Decimal` can hold and then
/// normalised.
///
/// # Errors
/// [`PositionError::MathOverflow`] if the price exceeds the `Decimal` range.
pub fn sqrt_price_to_ui_price(sqrt_price: u128, decimals_a: u8, decimals_b: u8) -> Result<Decimal> {
    check_decimals(decimals_a)?;
    check_decimals(decimals_b)?;

    let squared = mul(U512::from(sqrt_price), U512::from(sqrt_price))?;
    let numerator = mul(squared, U512::from(pow10(u32::from(decimals_a))?))?;
    let denominator = U512::from(pow10(u32::from(decimals_b))?) << 128u32;
    // Decimal mantissas are 96 bits wide.
    let mantissa_limit = U512::one() << 96u32;

    for scale in (0..=MAX_DECIMAL_SCALE).rev() {
        let scaled = mul(numerator, U512::from(pow10(scale)?))? / denominator;
        if scaled < mantissa_limit {
            let mantissa = i128::try_from(to_u128(scaled)?)
                .map_err(|_| PositionError::MathOverflow("price mantissa"))?;
            let price = Decimal::try_from_i128_with_scale(mantissa, scale)
                .map_err(|_| PositionError::MathOverflow("price mantissa"))?;
            return Ok(price.normalize());
        }
    }
    Err(PositionError::MathOverflow("price exceeds decimal range"))
}

/// UI price at `tick`.
pub fn tick_to_ui_price(tick: i32, decimals_a: u8, decimals_b: u8) -> Result<Decimal> {
    sqrt_price_to_ui_price(sqrt_price_at_tick(tick)?, decimals_a, decimals_b)
}

fn check_decimals(decimals: u8) -> Result<()> {
    if u32::from(decimals) > MAX_DECIMAL_SCALE {
        return Err(PositionError::InvalidDecimals(decimals));
    }
    Ok(())
}
