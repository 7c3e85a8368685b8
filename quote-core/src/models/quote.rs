use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of the presented quotation.
///
/// `service` and `details` carry display casing; the normalized key they
/// were derived from only matters during assembly. The operator may flip
/// `include` or overwrite the fee before export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub service: String,
    pub details: String,
    pub annual_fee_inr: Decimal,
    pub include: bool,
}

impl QuoteLine {
    pub fn new(
        service: String,
        details: String,
        annual_fee_inr: Decimal,
    ) -> Self {
        Self {
            service,
            details,
            annual_fee_inr,
            include: true,
        }
    }
}

/// Output of one assembly run.
///
/// `event_lines` holds event-triggered filings quoted for reference only;
/// they never contribute to `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledQuote {
    pub lines: Vec<QuoteLine>,
    pub event_lines: Vec<QuoteLine>,
    pub total: Decimal,
}

impl AssembledQuote {
    /// A client type with nothing applicable produces this; valid, not an
    /// error. The surface decides how to warn the operator.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.event_lines.is_empty()
    }
}

/// Derived money breakdown for the current line set. Recomputed whenever
/// included lines or the discount/tax rate change; never stored apart from
/// the lines it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub taxable_amount: Decimal,
    pub gst_amount: Decimal,
    pub grand_total: Decimal,
}
