//! CSV export. Amounts are written as plain decimals so the file stays
//! machine-readable; currency formatting belongs to the styled formats.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::render::QuoteDocument;

pub fn write_file(
    document: &QuoteDocument,
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create '{}'", path.display()))?;
    write_to(document, file)
}

pub fn write_to<W: Write>(
    document: &QuoteDocument,
    writer: W,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .flexible(true) // section headers and totals are short records
        .from_writer(writer);

    out.write_record(["Client Name", &document.client_name])?;
    out.write_record(["Client Type", &document.client_type.to_string()])?;
    out.write_record(["Date", &document.date.format("%d-%b-%Y").to_string()])?;
    out.write_record([""])?;

    out.write_record(["Service", "Details", "Annual Fee (INR)", "Included"])?;
    for line in &document.lines {
        out.write_record([
            line.service.as_str(),
            line.details.as_str(),
            &line.annual_fee_inr.to_string(),
            if line.include { "yes" } else { "no" },
        ])?;
    }

    if !document.event_lines.is_empty() {
        out.write_record([""])?;
        out.write_record(["Event-Triggered Filings (excluded from annual total)"])?;
        for line in &document.event_lines {
            out.write_record([
                line.service.as_str(),
                line.details.as_str(),
                &line.annual_fee_inr.to_string(),
            ])?;
        }
    }

    out.write_record([""])?;
    out.write_record(["Subtotal", &document.totals.subtotal.to_string()])?;
    out.write_record([
        format!("Discount ({}%)", document.discount_percent).as_str(),
        &document.totals.discount_amount.to_string(),
    ])?;
    out.write_record(["Taxable Amount", &document.totals.taxable_amount.to_string()])?;
    out.write_record([
        format!("GST ({}%)", document.gst_percent).as_str(),
        &document.totals.gst_amount.to_string(),
    ])?;
    out.write_record(["Grand Total", &document.totals.grand_total.to_string()])?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use quote_core::{ClientType, QuoteLine, QuoteTotals, compute_totals};

    use super::*;

    fn document() -> QuoteDocument {
        let lines = vec![QuoteLine::new(
            "Accounting".to_string(),
            "Annual Accounting".to_string(),
            dec!(5000),
        )];
        let totals: QuoteTotals = compute_totals(&lines, dec!(10), dec!(18));
        QuoteDocument {
            firm: "V. Purohit & Associates".to_string(),
            client_name: "Acme LLP".to_string(),
            client_type: ClientType::Llp,
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            lines,
            event_lines: vec![QuoteLine::new(
                "TDS Returns".to_string(),
                "Form 26QB".to_string(),
                dec!(2000),
            )],
            totals,
            discount_percent: dec!(10),
            gst_percent: dec!(18),
        }
    }

    #[test]
    fn csv_carries_lines_event_section_and_totals() {
        let mut buffer = Vec::new();

        write_to(&document(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Accounting,Annual Accounting,5000,yes"));
        assert!(text.contains("Event-Triggered Filings (excluded from annual total)"));
        assert!(text.contains("TDS Returns,Form 26QB,2000"));
        assert!(text.contains("Grand Total,5310.00"));
    }

    #[test]
    fn excluded_line_is_marked_not_dropped() {
        let mut doc = document();
        doc.lines[0].include = false;
        doc.totals = compute_totals(&doc.lines, doc.discount_percent, doc.gst_percent);
        let mut buffer = Vec::new();

        write_to(&doc, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Accounting,Annual Accounting,5000,no"));
        assert!(text.contains("Subtotal,0"));
    }

    #[test]
    fn totals_match_the_worked_example() {
        let doc = document();

        assert_eq!(doc.totals.grand_total, dec!(5310.00));
    }
}
