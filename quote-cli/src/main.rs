mod logging;
mod render;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::warn;

use quote_core::{
    AccountingPlan, ClientType, QuoteAssembler, QuoteLine, RuleSet, SelectionState,
    compute_totals, normalize_label, status_report,
};
use quote_data::{MatrixLoader, MatrixSet};

use crate::render::QuoteDocument;

#[derive(Parser)]
#[command(name = "quote-cli")]
#[command(version, about = "Matrix-driven quotation generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a quotation for one client and export it
    Generate(GenerateArgs),
    /// Print the per-client-type data-quality report for a matrix
    Status(StatusArgs),
    /// List the supported client types
    ClientTypes,
}

#[derive(Args)]
struct SourceArgs {
    /// Path to the matrix workbook (sheets "Applicability" and "Fees")
    #[arg(short, long, conflicts_with_all = ["applicability", "fees"])]
    workbook: Option<PathBuf>,

    /// Path to the applicability CSV (use together with --fees)
    #[arg(long, requires = "fees")]
    applicability: Option<PathBuf>,

    /// Path to the fees CSV (use together with --applicability)
    #[arg(long, requires = "applicability")]
    fees: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Client name as it should appear on the document
    #[arg(long)]
    client_name: String,

    /// Client type (see `quote-cli client-types`)
    #[arg(long)]
    client_type: String,

    /// Accounting plan: monthly, quarterly, annual, or none
    #[arg(long)]
    accounting_plan: Option<String>,

    /// Opt into an event-based filing; repeat for several
    #[arg(long = "event")]
    events: Vec<String>,

    /// Profession tax return variant, when part of the engagement
    #[arg(long)]
    profession_tax: Option<String>,

    /// Discount percentage, clamped to [0, 100]
    #[arg(long, default_value = "0")]
    discount: Decimal,

    /// GST percentage, clamped to [0, 100]
    #[arg(long, default_value = "18")]
    gst: Decimal,

    /// Drop a line from the total by its details label; repeat for several
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Output file (defaults to Quotation_<client>.<ext> for file formats)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// TOML file overriding the built-in business rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Letterhead name on the document
    #[arg(long, default_value = "V. Purohit & Associates")]
    firm: String,
}

#[derive(Args)]
struct StatusArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Xlsx,
    Pdf,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Status(args) => run_status(args),
        Commands::ClientTypes => {
            for client_type in ClientType::ALL {
                println!("{}", client_type.display_name());
            }
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let set = load_matrix(&args.source)?;
    let rules = load_rules(args.rules.as_deref())?;

    let client_type = parse_client_type(&args.client_type)?;
    let mut selection = SelectionState::new(&args.client_name, client_type)
        .with_discount_percent(clamp_percent(args.discount));
    if let Some(plan) = &args.accounting_plan {
        selection.accounting_plan = AccountingPlan::parse(plan).with_context(|| {
            format!("unknown accounting plan '{plan}' (monthly, quarterly, annual, or none)")
        })?;
    }
    for event in &args.events {
        selection = selection.with_event_choice(event);
    }
    if let Some(choice) = &args.profession_tax {
        selection = selection.with_profession_tax_choice(choice);
    }
    selection.validate()?;
    let gst_percent = clamp_percent(args.gst);

    let assembler = QuoteAssembler::new(&set.applicability, &set.fees, &rules);
    let mut quote = assembler.assemble(&selection)?;

    if quote.is_empty() {
        warn!(client_type = %client_type, "no applicable services");
        println!(
            "No applicable services found for client type {client_type}; no document produced."
        );
        return Ok(());
    }

    apply_exclusions(&mut quote.lines, &args.excludes);
    let totals = compute_totals(&quote.lines, selection.discount_percent, gst_percent);

    let document = QuoteDocument {
        firm: args.firm,
        client_name: selection.client_name.clone(),
        client_type,
        date: Local::now().date_naive(),
        lines: quote.lines,
        event_lines: quote.event_lines,
        totals,
        discount_percent: selection.discount_percent,
        gst_percent,
    };

    match args.format {
        OutputFormat::Table => render::table::print(&document),
        OutputFormat::Csv => {
            let out = output_path(args.out, &document.client_name, "csv");
            render::csv_out::write_file(&document, &out)?;
            println!("Wrote {}", out.display());
        }
        OutputFormat::Xlsx => {
            let out = output_path(args.out, &document.client_name, "xlsx");
            render::xlsx::write_file(&document, &out)?;
            println!("Wrote {}", out.display());
        }
        OutputFormat::Pdf => {
            let out = output_path(args.out, &document.client_name, "pdf");
            render::pdf::write_file(&document, &out)?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

fn run_status(args: StatusArgs) -> Result<()> {
    let set = load_matrix(&args.source)?;

    println!(
        "Loaded {} applicability rows and {} fee rows.",
        set.applicability.len(),
        set.fees.len()
    );
    for status in status_report(&set.applicability, &set.fees) {
        println!(
            "{:<20} applicable: {:>4}   missing/zero fee: {:>4}",
            status.client_type, status.applicable_count, status.missing_or_zero_fee_count
        );
    }
    Ok(())
}

fn load_matrix(source: &SourceArgs) -> Result<MatrixSet> {
    match (&source.workbook, &source.applicability, &source.fees) {
        (Some(workbook), _, _) => MatrixLoader::from_workbook(workbook)
            .with_context(|| format!("Failed to load workbook: {}", workbook.display())),
        (None, Some(applicability), Some(fees)) => {
            MatrixLoader::from_csv_paths(applicability, fees)
                .context("Failed to load CSV matrix pair")
        }
        _ => bail!("pass either --workbook or both --applicability and --fees"),
    }
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read rules file '{}'", path.display()))?;
    let rules: RuleSet = toml::from_str(&text)
        .with_context(|| format!("invalid rules file '{}'", path.display()))?;
    Ok(rules.normalized())
}

fn parse_client_type(raw: &str) -> Result<ClientType> {
    ClientType::parse(raw).with_context(|| {
        let known = ClientType::ALL
            .iter()
            .map(|ct| ct.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown client type '{raw}' (known: {known})")
    })
}

/// Range enforcement is this binary's job; the totals function trusts its
/// caller.
fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Marks lines the operator dropped. A label matches a line's details, or
/// its service when the line has no sub-service breakdown.
fn apply_exclusions(
    lines: &mut [QuoteLine],
    excludes: &[String],
) {
    let excluded: BTreeSet<String> = excludes.iter().map(|s| normalize_label(s)).collect();
    if excluded.is_empty() {
        return;
    }

    let mut matched: BTreeSet<&str> = BTreeSet::new();
    for line in lines.iter_mut() {
        let details_key = normalize_label(&line.details);
        let service_key = normalize_label(&line.service);
        let key = if details_key.is_empty() {
            service_key
        } else {
            details_key
        };
        if let Some(label) = excluded.get(&key) {
            line.include = false;
            matched.insert(label.as_str());
        }
    }

    for label in &excluded {
        if !matched.contains(label.as_str()) {
            warn!(label = %label, "exclusion matched no quoted line");
        }
    }
}

fn output_path(
    out: Option<PathBuf>,
    client_name: &str,
    extension: &str,
) -> PathBuf {
    out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "Quotation_{}.{extension}",
            client_name.replace(' ', "_")
        ))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn clamp_percent_bounds_both_ends() {
        assert_eq!(clamp_percent(dec!(-5)), dec!(0));
        assert_eq!(clamp_percent(dec!(42.5)), dec!(42.5));
        assert_eq!(clamp_percent(dec!(150)), dec!(100));
    }

    #[test]
    fn output_path_defaults_to_client_name() {
        let path = output_path(None, "Acme Traders LLP", "pdf");

        assert_eq!(path, PathBuf::from("Quotation_Acme_Traders_LLP.pdf"));
    }

    #[test]
    fn output_path_prefers_explicit_out() {
        let path = output_path(Some(PathBuf::from("/tmp/q.pdf")), "Acme", "pdf");

        assert_eq!(path, PathBuf::from("/tmp/q.pdf"));
    }

    #[test]
    fn unknown_client_type_lists_the_known_ones() {
        let err = parse_client_type("sole trader").unwrap_err();

        assert!(err.to_string().contains("Private Limited"));
    }

    #[test]
    fn exclusions_match_details_case_insensitively() {
        let mut lines = vec![
            QuoteLine::new("Accounting".into(), "Annual Accounting".into(), dec!(5000)),
            QuoteLine::new("ITR Filing".into(), "".into(), dec!(6000)),
        ];

        apply_exclusions(&mut lines, &["annual accounting".to_string()]);

        assert!(!lines[0].include);
        assert!(lines[1].include);
    }

    #[test]
    fn exclusions_fall_back_to_service_for_blank_details() {
        let mut lines = vec![QuoteLine::new("ITR Filing".into(), "".into(), dec!(6000))];

        apply_exclusions(&mut lines, &["itr filing".to_string()]);

        assert!(!lines[0].include);
    }
}
