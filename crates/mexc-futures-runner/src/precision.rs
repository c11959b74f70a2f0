/*
[INPUT]:  Decimal values and signed precision from the rounding tables
[OUTPUT]: Values rounded half-to-even at the requested precision
[POS]:    Configuration layer - quantity / take-profit rounding helper
[UPDATE]: When rounding rules change
*/

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest power of ten a `Decimal` can hold
const MAX_NEGATIVE_PRECISION: u32 = 28;

/// Round `value` to `precision` decimal places, half-to-even.
///
/// A negative precision rounds to a power of ten above the unit:
/// `-1` rounds to tens, `-2` to hundreds.
pub fn round_to_precision(value: Decimal, precision: i32) -> Decimal {
    if precision >= 0 {
        return value.round_dp_with_strategy(
            precision.unsigned_abs(),
            RoundingStrategy::MidpointNearestEven,
        );
    }

    let exponent = precision.unsigned_abs().min(MAX_NEGATIVE_PRECISION);
    let step = Decimal::from_i128_with_scale(10_i128.pow(exponent), 0);
    (value / step).round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven) * step
}
