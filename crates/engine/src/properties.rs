//! Property-based tests using `proptest` for quoting invariants.
//!
//! 1. **Tick round trip**: `tick_at_sqrt_price(sqrt_price_at_tick(t)) == t`.
//! 2. **Monotonicity**: sqrt price strictly increases with the tick.
//! 3. **Liquidity minimum**: a two-sided deposit takes the scarcer side.
//! 4. **Inverse consistency**: costs never exceed what was offered.
//! 5. **Slippage ordering**: `minimum <= exact <= maximum`.
//! 6. **Fees**: nothing accrues to zero liquidity.
//! 7. **Determinism**: identical inputs give identical quotes.

use proptest::prelude::*;

use crate::fees::fee_owed;
use crate::slippage::{SlippageBounder, SlippageMode};
use crate::test_support::{pair, pair_at_tick, position, position_id, registry_with};
use crate::valuation::PositionValuation;
use clmm_positions_domain::enums::{Rounding, RoundingIntent};
use clmm_positions_domain::math::concentrated_liquidity::{
    amounts_for_liquidity, calculate_liquidity, liquidity_from_amount_a, liquidity_from_amount_b,
};
use clmm_positions_domain::math::price_tick::{
    MAX_TICK, MIN_TICK, sqrt_price_at_tick, sqrt_price_to_aligned_tick, tick_at_sqrt_price,
};
use clmm_positions_domain::value_objects::{
    AmountPair, DepositAmounts, SlippageTolerance, TickRange, WithdrawalPercent,
};
use clmm_positions_domain::PositionError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn tick_strategy() -> impl Strategy<Value = i32> {
    MIN_TICK..=MAX_TICK
}

/// Lower tick, upper tick and a current tick somewhere around the range.
fn range_strategy() -> impl Strategy<Value = (i32, i32, i32)> {
    (-200_000i32..200_000, 1i32..50_000, -60_000i32..60_000)
        .prop_map(|(lower, width, offset)| (lower, lower + width, lower + offset))
}

fn amount_strategy() -> impl Strategy<Value = u64> {
    1u64..1_000_000_000_000_000
}

/// Tolerances from 0.0001% to 100%.
fn tolerance_strategy() -> impl Strategy<Value = SlippageTolerance> {
    (1i64..=1_000_000).prop_map(|ppm| {
        let Ok(t) = SlippageTolerance::new(Decimal::new(ppm, 6)) else {
            panic!("tolerance in (0, 1]");
        };
        t
    })
}

fn sqrt(tick: i32) -> u128 {
    let Ok(s) = sqrt_price_at_tick(tick) else {
        panic!("tick {tick} in range");
    };
    s
}

// ---------------------------------------------------------------------------
// Tick conversions
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_tick_round_trip(tick in tick_strategy()) {
        prop_assert_eq!(tick_at_sqrt_price(sqrt(tick)), Ok(tick));
    }

    #[test]
    fn prop_sqrt_price_monotonic(a in tick_strategy(), b in tick_strategy()) {
        prop_assume!(a != b);
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(sqrt(lo) < sqrt(hi));
    }

    #[test]
    fn prop_aligned_round_trip(k in -4_000i32..4_000, spacing in prop::sample::select(vec![1u16, 8, 10, 64, 100])) {
        let tick = k * i32::from(spacing);
        let s = sqrt(tick);
        prop_assert_eq!(sqrt_price_to_aligned_tick(s, spacing, Rounding::Down), Ok(tick));
        prop_assert_eq!(sqrt_price_to_aligned_tick(s, spacing, Rounding::Up), Ok(tick));
    }

    #[test]
    fn prop_aligned_ticks_bracket_price(tick in -400_000i32..400_000, spacing in 1u16..200) {
        let s = sqrt(tick) + 1;
        let down = sqrt_price_to_aligned_tick(s, spacing, Rounding::Down);
        let up = sqrt_price_to_aligned_tick(s, spacing, Rounding::Up);
        let (Ok(down), Ok(up)) = (down, up) else {
            return Ok(());
        };
        prop_assert!(sqrt(down) <= s);
        prop_assert!(sqrt(up) >= s);
        prop_assert!(up - down <= i32::from(spacing));
    }
}

// ---------------------------------------------------------------------------
// Liquidity math
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_both_takes_minimum(
        (lower, upper, _) in range_strategy(),
        cur_frac in 1u32..1000,
        a in amount_strategy(),
        b in amount_strategy(),
    ) {
        prop_assume!(upper - lower >= 2);
        let current = lower + 1 + ((upper - lower - 2) as i64 * i64::from(cur_frac) / 1000) as i32;
        let (pl, pu, pc) = (sqrt(lower), sqrt(upper), sqrt(current));
        prop_assume!(pl < pc && pc < pu);

        let deposit = DepositAmounts::Both { amount_a: a, amount_b: b };
        let from_a = liquidity_from_amount_a(a, pc, pu);
        let from_b = liquidity_from_amount_b(b, pl, pc);
        let (Ok(from_a), Ok(from_b)) = (from_a.clone(), from_b.clone()) else {
            return Err(TestCaseError::fail(format!("single-sided liquidity failed: {from_a:?} {from_b:?}")));
        };
        prop_assert_eq!(calculate_liquidity(deposit, pl, pu, pc), Ok(from_a.min(from_b)));
    }

    #[test]
    fn prop_costs_never_exceed_offer(
        (lower, upper, current) in range_strategy(),
        a in amount_strategy(),
        b in amount_strategy(),
    ) {
        let (pl, pu, pc) = (sqrt(lower), sqrt(upper), sqrt(current));
        let deposit = DepositAmounts::Both { amount_a: a, amount_b: b };
        let Ok(liquidity) = calculate_liquidity(deposit, pl, pu, pc) else {
            return Ok(());
        };
        let cost = amounts_for_liquidity(liquidity, pl, pu, pc, RoundingIntent::Cost);
        prop_assert!(cost.is_ok());
        let Ok(cost) = cost else { return Ok(()); };
        prop_assert!(cost.amount_a <= a, "cost A {} > offered {}", cost.amount_a, a);
        prop_assert!(cost.amount_b <= b, "cost B {} > offered {}", cost.amount_b, b);

        let Ok(payout) = amounts_for_liquidity(liquidity, pl, pu, pc, RoundingIntent::Payout) else {
            return Ok(());
        };
        prop_assert!(payout.amount_a <= cost.amount_a && cost.amount_a - payout.amount_a <= 1);
        prop_assert!(payout.amount_b <= cost.amount_b && cost.amount_b - payout.amount_b <= 1);
    }

    #[test]
    fn prop_inverted_range_rejected(a in tick_strategy(), b in tick_strategy(), amount in amount_strategy()) {
        prop_assume!(a >= b);
        let result = calculate_liquidity(DepositAmounts::A(amount), sqrt(a), sqrt(b), sqrt(0));
        let is_invalid_range = matches!(result, Err(PositionError::InvalidSqrtRange { .. }));
        prop_assert!(is_invalid_range);
        let is_invalid_tick_range = matches!(TickRange::new(a, b), Err(PositionError::InvalidRange { .. }));
        prop_assert!(is_invalid_tick_range);
    }
}

// ---------------------------------------------------------------------------
// Slippage, fees and withdrawals
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_slippage_ordering(
        a in 0u64..u64::MAX / 4,
        b in 0u64..u64::MAX / 4,
        tolerance in tolerance_strategy(),
    ) {
        let bounder = SlippageBounder::new(tolerance);
        let Ok((num, den)) = tolerance.ratio() else {
            return Ok(());
        };

        let cost = AmountPair::new(a, b, RoundingIntent::Cost);
        let Ok(max) = bounder.bound(&cost, SlippageMode::Deposit) else {
            return Ok(());
        };
        prop_assert!(max.maximum.amount_a >= a && max.maximum.amount_b >= b);
        // The guard widens by at most ceil(exact * s).
        let slack_a = u128::from(a) * num / den + 1;
        prop_assert!(u128::from(max.maximum.amount_a - a) <= slack_a);

        let payout = AmountPair::new(a, b, RoundingIntent::Payout);
        let Ok(min) = bounder.bound(&payout, SlippageMode::Withdrawal) else {
            return Ok(());
        };
        prop_assert!(min.minimum.amount_a <= a && min.minimum.amount_b <= b);
        prop_assert_eq!(min.maximum, max.maximum);
        prop_assert!(u128::from(a - min.minimum.amount_a) <= slack_a);
    }

    #[test]
    fn prop_zero_liquidity_accrues_nothing(global in any::<u128>(), checkpoint in any::<u128>()) {
        let (global, checkpoint) = (global.max(checkpoint), global.min(checkpoint));
        prop_assert_eq!(fee_owed(0, global, checkpoint), Ok(0));
    }

    #[test]
    fn prop_fees_grow_with_liquidity(
        l1 in 0u128..1_000_000_000_000,
        l2 in 0u128..1_000_000_000_000,
        growth in 0u128..(1u128 << 80),
    ) {
        let (small, large) = if l1 <= l2 { (l1, l2) } else { (l2, l1) };
        let f_small = fee_owed(small, growth, 0);
        let f_large = fee_owed(large, growth, 0);
        let (Ok(f_small), Ok(f_large)) = (f_small.clone(), f_large.clone()) else {
            return Err(TestCaseError::fail(format!("fee failed: {f_small:?} {f_large:?}")));
        };
        prop_assert!(f_small <= f_large);
    }

    #[test]
    fn prop_withdrawal_never_exceeds_position(
        liquidity in 0u128..1_000_000_000_000_000_000,
        percent_ppm in 1i64..=1_000_000,
    ) {
        let registry = registry_with(pair(), vec![position(-1000, 1000, liquidity)]);
        let valuation = PositionValuation::new(&registry);
        let Ok(percent) = WithdrawalPercent::new(Decimal::new(percent_ppm, 6)) else {
            panic!("percent in (0, 1]");
        };
        let Ok(tolerance) = SlippageTolerance::new(dec!(0.01)) else {
            panic!("valid tolerance");
        };
        let quote = valuation.value_for_withdrawal(&position_id(1), percent, tolerance);
        let Ok(quote) = quote else {
            return Err(TestCaseError::fail(format!("withdrawal failed: {quote:?}")));
        };
        prop_assert!(quote.liquidity_to_remove <= liquidity);
        if percent_ppm == 1_000_000 {
            prop_assert_eq!(quote.liquidity_to_remove, liquidity);
        }
        let full = valuation.value_for_withdrawal(&position_id(1), WithdrawalPercent::FULL, tolerance);
        prop_assert_eq!(full.map(|q| q.liquidity_to_remove), Ok(liquidity));
        prop_assert!(quote.min_amounts.amount_a <= quote.amounts.amount_a);
        prop_assert!(quote.min_amounts.amount_b <= quote.amounts.amount_b);
        prop_assert!(quote.max_amounts.amount_a >= quote.amounts.amount_a);
        prop_assert!(quote.max_amounts.amount_b >= quote.amounts.amount_b);
    }

    #[test]
    fn prop_quotes_are_deterministic(
        current in -5_000i32..5_000,
        a in amount_strategy(),
        b in amount_strategy(),
        tolerance in tolerance_strategy(),
    ) {
        let registry = registry_with(pair_at_tick(current), Vec::new());
        let valuation = PositionValuation::new(&registry);
        let Ok(range) = TickRange::new(-2_000, 2_000) else {
            panic!("valid range");
        };
        let deposit = DepositAmounts::Both { amount_a: a, amount_b: b };
        let first = valuation.quote_deposit(range, deposit, tolerance);
        let second = valuation.quote_deposit(range, deposit, tolerance);
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn test_two_sided_deposit_inside_range() {
    let registry = registry_with(pair(), Vec::new());
    let valuation = PositionValuation::new(&registry);
    let Ok(tolerance) = SlippageTolerance::new(dec!(0.01)) else {
        panic!("valid tolerance");
    };
    let Ok(range) = TickRange::new(-100, 100) else {
        panic!("valid range");
    };
    let deposit = DepositAmounts::Both {
        amount_a: 1000,
        amount_b: 1000,
    };
    let Ok(quote) = valuation.quote_deposit(range, deposit, tolerance) else {
        panic!("quote succeeds");
    };

    let (pl, pu, pc) = (sqrt(-100), sqrt(100), sqrt(0));
    let (Ok(from_a), Ok(from_b)) = (
        liquidity_from_amount_a(1000, pc, pu),
        liquidity_from_amount_b(1000, pl, pc),
    ) else {
        panic!("single-sided liquidity");
    };
    assert_eq!(quote.liquidity, from_a.min(from_b));
    assert!(quote.amounts.amount_a <= 1000);
    assert!(quote.amounts.amount_b <= 1000);
}

#[test]
fn test_half_withdrawal_of_small_position() {
    for liquidity in [200u128, 2_000_000_000_000] {
        let registry = registry_with(pair(), vec![position(-100, 100, liquidity)]);
        let valuation = PositionValuation::new(&registry);
        let (Ok(percent), Ok(tolerance)) = (
            WithdrawalPercent::new(dec!(0.5)),
            SlippageTolerance::new(dec!(0.01)),
        ) else {
            panic!("valid inputs");
        };
        let Ok(quote) = valuation.value_for_withdrawal(&position_id(1), percent, tolerance) else {
            panic!("quote succeeds");
        };
        assert_eq!(quote.liquidity_to_remove, liquidity / 2);
        assert_eq!(quote.min_amounts.amount_a, quote.amounts.amount_a * 99 / 100);
        assert_eq!(quote.min_amounts.amount_b, quote.amounts.amount_b * 99 / 100);
    }
}

#[test]
fn test_inverted_ticks_rejected_everywhere() {
    assert!(matches!(
        TickRange::new(100, -100),
        Err(PositionError::InvalidRange { .. })
    ));
    assert!(matches!(
        TickRange::new(100, 100),
        Err(PositionError::InvalidRange { .. })
    ));
    assert!(matches!(
        TickRange::new(MAX_TICK + 1, 0),
        Err(PositionError::InvalidRange { .. })
    ));
    assert!(matches!(
        calculate_liquidity(DepositAmounts::B(5), sqrt(100), sqrt(-100), sqrt(0)),
        Err(PositionError::InvalidSqrtRange { .. })
    ));
}

#[test]
fn test_closed_position_reports_no_fees() {
    use crate::fees::pending_fees;
    use crate::test_support::pair_with_growth;

    let pair = pair_with_growth(u128::MAX, 1u128 << 127);
    let closed = position(-100, 100, 0);
    let Ok(fees) = pending_fees(&closed, &pair) else {
        panic!("fees computed");
    };
    assert_eq!((fees.amount_a, fees.amount_b), (0, 0));
}
