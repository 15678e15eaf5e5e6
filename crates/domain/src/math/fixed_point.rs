//! Wide-integer helpers for Q64.64 fixed-point arithmetic.
//!
//! Intermediates are computed in 512 bits so that products of two or three
//! `u128` values never wrap. Every division takes an explicit [`Rounding`].

use crate::enums::Rounding;
use crate::error::{PositionError, Result};
use primitive_types::U512;

/// Number of fractional bits in a Q64.64 value.
pub const Q64_RESOLUTION: u32 = 64;

/// `1.0` in Q64.64.
pub const Q64: u128 = 1 << Q64_RESOLUTION;

/// Largest power of ten that fits in a `u128`.
const MAX_POW10_EXP: u32 = 38;

/// Checked 512-bit multiplication.
pub fn mul(a: U512, b: U512) -> Result<U512> {
    a.checked_mul(b)
        .ok_or(PositionError::MathOverflow("512-bit multiplication"))
}

/// Divides with the requested rounding direction.
pub fn div_rounding(numerator: U512, denominator: U512, rounding: Rounding) -> Result<U512> {
    if denominator.is_zero() {
        return Err(PositionError::MathOverflow("division by zero"));
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up => {
            if (numerator % denominator).is_zero() {
                Ok(quotient)
            } else {
                quotient
                    .checked_add(U512::one())
                    .ok_or(PositionError::MathOverflow("rounding up"))
            }
        }
    }
}

/// Computes `a * b / denominator` without intermediate overflow.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    let product = mul(U512::from(a), U512::from(b))?;
    to_u128(div_rounding(product, U512::from(denominator), rounding)?)
}

/// Narrows to `u128`, failing instead of truncating.
pub fn to_u128(value: U512) -> Result<u128> {
    if value > U512::from(u128::MAX) {
        return Err(PositionError::MathOverflow("value exceeds u128"));
    }
    Ok(value.low_u128())
}

/// Narrows to `u64`, failing instead of truncating.
pub fn to_u64(value: U512) -> Result<u64> {
    if value > U512::from(u64::MAX) {
        return Err(PositionError::MathOverflow("value exceeds u64"));
    }
    Ok(value.low_u64())
}

/// `10^exp` as `u128`.
pub fn pow10(exp: u32) -> Result<u128> {
    if exp > MAX_POW10_EXP {
        return Err(PositionError::MathOverflow("power of ten exceeds u128"));
    }
    Ok(10u128.pow(exp))
}

/// Floor of the square root (Newton iteration).
#[must_use]
pub fn integer_sqrt(value: U512) -> U512 {
    if value.is_zero() {
        return value;
    }
    // 2^ceil(bits/2) is always >= sqrt(value), so the iteration decreases.
    let shift = value.bits().div_ceil(2) as u32;
    let mut x = U512::one() << shift;
    loop {
        let y = (x + value / x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}
