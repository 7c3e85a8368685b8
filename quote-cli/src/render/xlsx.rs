//! Excel export via rust_xlsxwriter: one worksheet, styled header row,
//! event section, totals block.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use quote_core::QuoteLine;

use crate::render::QuoteDocument;

pub fn write_file(
    document: &QuoteDocument,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Quotation")?;

    let title = Format::new().set_bold().set_font_size(14);
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00").set_align(FormatAlign::Right);
    let money_bold = Format::new()
        .set_bold()
        .set_num_format("#,##0.00")
        .set_align(FormatAlign::Right);

    worksheet.set_column_width(0, 32)?;
    worksheet.set_column_width(1, 32)?;
    worksheet.set_column_width(2, 18)?;
    worksheet.set_column_width(3, 10)?;

    worksheet.write_string_with_format(0, 0, &document.firm, &title)?;
    worksheet.write_string_with_format(1, 0, "Quotation", &bold)?;
    worksheet.write_string(3, 0, "Client Name")?;
    worksheet.write_string(3, 1, &document.client_name)?;
    worksheet.write_string(4, 0, "Client Type")?;
    worksheet.write_string(4, 1, &document.client_type.to_string())?;
    worksheet.write_string(5, 0, "Date")?;
    worksheet.write_string(5, 1, &document.date.format("%d-%b-%Y").to_string())?;

    let mut row = 7;
    row = write_line_block(
        worksheet,
        row,
        "Annual Services",
        &document.lines,
        true,
        &bold,
        &money,
    )?;

    if !document.event_lines.is_empty() {
        row += 1;
        row = write_line_block(
            worksheet,
            row,
            "Event-Triggered Filings (excluded from annual total)",
            &document.event_lines,
            false,
            &bold,
            &money,
        )?;
    }

    row += 1;
    let totals = [
        ("Subtotal".to_string(), document.totals.subtotal, false),
        (
            format!("Discount ({}%)", document.discount_percent),
            document.totals.discount_amount,
            false,
        ),
        (
            "Taxable Amount".to_string(),
            document.totals.taxable_amount,
            false,
        ),
        (
            format!("GST ({}%)", document.gst_percent),
            document.totals.gst_amount,
            false,
        ),
        ("Grand Total".to_string(), document.totals.grand_total, true),
    ];
    for (label, amount, emphasized) in totals {
        if emphasized {
            worksheet.write_string_with_format(row, 1, &label, &bold)?;
            worksheet.write_number_with_format(row, 2, to_f64(amount), &money_bold)?;
        } else {
            worksheet.write_string(row, 1, &label)?;
            worksheet.write_number_with_format(row, 2, to_f64(amount), &money)?;
        }
        row += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("cannot write '{}'", path.display()))?;
    Ok(())
}

fn write_line_block(
    worksheet: &mut Worksheet,
    start_row: u32,
    heading: &str,
    lines: &[QuoteLine],
    with_include_column: bool,
    bold: &Format,
    money: &Format,
) -> Result<u32> {
    let mut row = start_row;
    worksheet.write_string_with_format(row, 0, heading, bold)?;
    row += 1;

    worksheet.write_string_with_format(row, 0, "Service", bold)?;
    worksheet.write_string_with_format(row, 1, "Details", bold)?;
    worksheet.write_string_with_format(row, 2, "Annual Fee (INR)", bold)?;
    if with_include_column {
        worksheet.write_string_with_format(row, 3, "Included", bold)?;
    }
    row += 1;

    for line in lines {
        worksheet.write_string(row, 0, &line.service)?;
        worksheet.write_string(row, 1, &line.details)?;
        worksheet.write_number_with_format(row, 2, to_f64(line.annual_fee_inr), money)?;
        if with_include_column {
            worksheet.write_string(row, 3, if line.include { "yes" } else { "no" })?;
        }
        row += 1;
    }

    Ok(row)
}

fn to_f64(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
