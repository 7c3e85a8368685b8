//! PDF export: a Tera template renders Typst markup, and the external
//! `typst` binary compiles it. The intermediate `.typ` file is left next to
//! the PDF so a layout problem can be inspected.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tera::{Context as TeraContext, Tera};
use tracing::info;

use quote_core::QuoteLine;

use crate::render::{QuoteDocument, format_inr};

const TEMPLATE: &str = include_str!("../../templates/quotation.tera");

#[derive(Serialize)]
struct LineContext {
    service: String,
    details: String,
    fee: String,
}

fn line_context(line: &QuoteLine) -> LineContext {
    LineContext {
        service: line.service.clone(),
        details: line.details.clone(),
        fee: format_inr(line.annual_fee_inr),
    }
}

pub fn write_file(
    document: &QuoteDocument,
    path: &Path,
) -> Result<()> {
    if Command::new("typst").arg("--version").output().is_err() {
        bail!("'typst' is not installed; it is required for PDF output");
    }

    let mut tera = Tera::default();
    tera.add_raw_template("quotation", TEMPLATE)
        .context("quotation template is invalid")?;

    // The PDF is the final document: lines the operator excluded are
    // dropped here, not marked.
    let annual_lines: Vec<LineContext> = document
        .lines
        .iter()
        .filter(|line| line.include)
        .map(line_context)
        .collect();
    let event_lines: Vec<LineContext> = document.event_lines.iter().map(line_context).collect();

    let mut ctx = TeraContext::new();
    ctx.insert("firm", &document.firm);
    ctx.insert("client_name", &document.client_name);
    ctx.insert("client_type", &document.client_type.to_string());
    ctx.insert("date", &document.date.format("%d-%b-%Y").to_string());
    ctx.insert("lines", &annual_lines);
    ctx.insert("event_lines", &event_lines);
    ctx.insert("subtotal", &format_inr(document.totals.subtotal));
    ctx.insert("discount_percent", &document.discount_percent.to_string());
    ctx.insert("discount_amount", &format_inr(document.totals.discount_amount));
    ctx.insert("taxable_amount", &format_inr(document.totals.taxable_amount));
    ctx.insert("gst_percent", &document.gst_percent.to_string());
    ctx.insert("gst_amount", &format_inr(document.totals.gst_amount));
    ctx.insert("grand_total", &format_inr(document.totals.grand_total));

    let source = tera.render("quotation", &ctx)?;

    let typ_path = path.with_extension("typ");
    fs::write(&typ_path, source)
        .with_context(|| format!("cannot write '{}'", typ_path.display()))?;

    let status = Command::new("typst")
        .arg("compile")
        .arg(&typ_path)
        .arg(path)
        .status()
        .context("failed to run typst")?;
    if !status.success() {
        bail!("typst compile failed for '{}'", typ_path.display());
    }

    info!(path = %path.display(), "wrote quotation PDF");
    Ok(())
}
