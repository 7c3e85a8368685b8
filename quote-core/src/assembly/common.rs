//! Shared arithmetic helpers for quote assembly and totals.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (away from zero at the midpoint), the convention used on every
/// money amount printed on a quotation.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::assembly::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(809.994)), dec!(809.99));
/// assert_eq!(round_half_up(dec!(809.995)), dec!(810.00));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(5310.00)), dec!(5310.00));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0)), dec!(0));
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50.00), dec!(0)), dec!(0));
    }
}
