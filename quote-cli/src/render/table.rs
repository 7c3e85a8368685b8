//! Terminal rendering of a quotation, for previewing before export.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use quote_core::QuoteLine;

use crate::render::{QuoteDocument, format_inr};

pub fn print(document: &QuoteDocument) {
    println!("{}", document.firm);
    println!("Quotation");
    println!();
    println!("Client Name: {}", document.client_name);
    println!("Client Type: {}", document.client_type);
    println!("Date:        {}", document.date.format("%d-%b-%Y"));
    println!();

    println!("{}", lines_table(&document.lines, true));

    if !document.event_lines.is_empty() {
        println!();
        println!("Event-Triggered Filings (billed on occurrence, excluded from annual total)");
        println!("{}", lines_table(&document.event_lines, false));
    }

    println!();
    println!("{}", totals_table(document));
}

fn lines_table(
    lines: &[QuoteLine],
    with_include_column: bool,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Service").add_attribute(Attribute::Bold),
        Cell::new("Details").add_attribute(Attribute::Bold),
        Cell::new("Annual Fee (INR)").add_attribute(Attribute::Bold),
    ];
    if with_include_column {
        header.push(Cell::new("Included").add_attribute(Attribute::Bold));
    }
    table.set_header(header);

    for line in lines {
        let mut row = vec![
            Cell::new(&line.service),
            Cell::new(&line.details),
            Cell::new(format_inr(line.annual_fee_inr)).set_alignment(CellAlignment::Right),
        ];
        if with_include_column {
            row.push(Cell::new(if line.include { "yes" } else { "no" }));
        }
        table.add_row(row);
    }

    table
}

fn totals_table(document: &QuoteDocument) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let rows = [
        ("Subtotal".to_string(), document.totals.subtotal),
        (
            format!("Discount ({}%)", document.discount_percent),
            document.totals.discount_amount,
        ),
        ("Taxable Amount".to_string(), document.totals.taxable_amount),
        (
            format!("GST ({}%)", document.gst_percent),
            document.totals.gst_amount,
        ),
        ("Grand Total".to_string(), document.totals.grand_total),
    ];

    for (label, amount) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_inr(amount)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
