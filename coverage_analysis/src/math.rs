//! Numeric helpers shared by the aggregator.

use num_traits::ToPrimitive;

/// Divides `numerator` by `denominator`, returning `0.0` when the denominator is zero.
pub fn safe_divide<T: ToPrimitive>(numerator: T, denominator: T) -> f64 {
    let denominator = denominator.to_f64().unwrap_or_default();
    if denominator == 0.0 {
        return 0.0;
    }
    numerator.to_f64().unwrap_or_default() / denominator
}

/// Share of `covered` in `total` expressed on a 0-100 scale.
pub fn percentage<T: ToPrimitive>(covered: T, total: T) -> f64 {
    100.0 * safe_divide(covered, total)
}
