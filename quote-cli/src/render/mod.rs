//! Document rendering for assembled quotations.
//!
//! Every renderer consumes the same [`QuoteDocument`]; none of them touch
//! the assembly logic. The terminal table goes to stdout, the file formats
//! take an output path.

pub mod csv_out;
pub mod pdf;
pub mod table;
pub mod xlsx;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use quote_core::{ClientType, QuoteLine, QuoteTotals};

/// Everything a renderer needs for one quotation document.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDocument {
    pub firm: String,
    pub client_name: String,
    pub client_type: ClientType,
    pub date: NaiveDate,
    pub lines: Vec<QuoteLine>,
    pub event_lines: Vec<QuoteLine>,
    pub totals: QuoteTotals,
    pub discount_percent: Decimal,
    pub gst_percent: Decimal,
}

/// Formats an INR amount with thousand separators: `12000` becomes
/// `12,000` and `5310.50` becomes `5,310.50`. Whole amounts drop the
/// paise, matching how the firm prints fees.
pub fn format_inr(value: Decimal) -> String {
    let rounded = value.round_dp(2).normalize();
    let text = if rounded.scale() == 0 {
        rounded.to_string()
    } else {
        format!("{rounded:.2}")
    };
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_inr_groups_thousands() {
        assert_eq!(format_inr(dec!(0)), "0");
        assert_eq!(format_inr(dec!(500)), "500");
        assert_eq!(format_inr(dec!(12000)), "12,000");
        assert_eq!(format_inr(dec!(150000)), "150,000");
        assert_eq!(format_inr(dec!(1234567)), "1,234,567");
    }

    #[test]
    fn format_inr_keeps_nonzero_paise() {
        assert_eq!(format_inr(dec!(5310.50)), "5,310.50");
        assert_eq!(format_inr(dec!(5310.00)), "5,310");
    }
}
