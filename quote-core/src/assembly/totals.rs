//! Discount and GST arithmetic for the presented totals block.

use rust_decimal::Decimal;
use tracing::debug;

use crate::assembly::common::{max, round_half_up};
use crate::models::{QuoteLine, QuoteTotals};

/// Computes the totals block from the current line set.
///
/// - subtotal: sum of fees over lines with `include == true`
/// - discount: subtotal x discount% rounded to 2 dp
/// - taxable: subtotal minus discount, floored at zero
/// - gst: taxable x gst% rounded to 2 dp
/// - grand total: taxable + gst rounded to 2 dp
///
/// Both percentages are the caller's contract: clamp to [0, 100] before
/// calling. Out-of-range input is not checked here.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::{QuoteLine, compute_totals};
///
/// let lines = vec![QuoteLine::new("Accounting".into(), "Annual Accounting".into(), dec!(5000))];
/// let totals = compute_totals(&lines, dec!(10), dec!(18));
///
/// assert_eq!(totals.discount_amount, dec!(500.00));
/// assert_eq!(totals.taxable_amount, dec!(4500));
/// assert_eq!(totals.gst_amount, dec!(810.00));
/// assert_eq!(totals.grand_total, dec!(5310.00));
/// ```
pub fn compute_totals(
    lines: &[QuoteLine],
    discount_percent: Decimal,
    gst_percent: Decimal,
) -> QuoteTotals {
    let subtotal: Decimal = lines
        .iter()
        .filter(|line| line.include)
        .map(|line| line.annual_fee_inr)
        .sum();

    let discount_amount = round_half_up(subtotal * discount_percent / Decimal::ONE_HUNDRED);
    let taxable_amount = max(subtotal - discount_amount, Decimal::ZERO);
    let gst_amount = round_half_up(taxable_amount * gst_percent / Decimal::ONE_HUNDRED);
    let grand_total = round_half_up(taxable_amount + gst_amount);

    debug!(%subtotal, %discount_amount, %gst_amount, %grand_total, "computed totals");

    QuoteTotals {
        subtotal,
        discount_amount,
        taxable_amount,
        gst_amount,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn line(
        fee: Decimal,
        include: bool,
    ) -> QuoteLine {
        QuoteLine {
            service: "Accounting".to_string(),
            details: "Annual Accounting".to_string(),
            annual_fee_inr: fee,
            include,
        }
    }

    #[test]
    fn discount_and_gst_chain_matches_the_worked_example() {
        let lines = vec![line(dec!(5000), true)];

        let totals = compute_totals(&lines, dec!(10), dec!(18));

        assert_eq!(totals.subtotal, dec!(5000));
        assert_eq!(totals.discount_amount, dec!(500.00));
        assert_eq!(totals.taxable_amount, dec!(4500.00));
        assert_eq!(totals.gst_amount, dec!(810.00));
        assert_eq!(totals.grand_total, dec!(5310.00));
    }

    #[test]
    fn excluded_lines_never_enter_the_subtotal() {
        let lines = vec![line(dec!(5000), true), line(dec!(3000), false)];

        let totals = compute_totals(&lines, dec!(0), dec!(18));

        assert_eq!(totals.subtotal, dec!(5000));
    }

    #[test]
    fn zero_rates_pass_the_subtotal_through() {
        let lines = vec![line(dec!(7250), true)];

        let totals = compute_totals(&lines, dec!(0), dec!(0));

        assert_eq!(totals.discount_amount, dec!(0.00));
        assert_eq!(totals.gst_amount, dec!(0.00));
        assert_eq!(totals.grand_total, dec!(7250.00));
    }

    #[test]
    fn full_discount_floors_taxable_at_zero() {
        let lines = vec![line(dec!(5000), true)];

        let totals = compute_totals(&lines, dec!(100), dec!(18));

        assert_eq!(totals.taxable_amount, dec!(0.00));
        assert_eq!(totals.gst_amount, dec!(0.00));
        assert_eq!(totals.grand_total, dec!(0.00));
    }

    #[test]
    fn empty_line_set_totals_to_zero() {
        let totals = compute_totals(&[], dec!(10), dec!(18));

        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.grand_total, dec!(0.00));
    }

    #[test]
    fn fractional_discount_rounds_half_up() {
        // 3333 x 7.5% = 249.975 -> 249.98
        let lines = vec![line(dec!(3333), true)];

        let totals = compute_totals(&lines, dec!(7.5), dec!(0));

        assert_eq!(totals.discount_amount, dec!(249.98));
        assert_eq!(totals.taxable_amount, dec!(3083.02));
    }
}
