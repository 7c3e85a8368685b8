use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quote_core::status_report;
use quote_data::MatrixLoader;

/// Check a service/fee matrix for data-quality problems.
///
/// Loads the matrix and prints, per client type, how many rows are marked
/// applicable and how many of those have a missing or zero fee. Use this
/// after editing the spreadsheet, before anyone quotes from it.
#[derive(Parser, Debug)]
#[command(name = "quote-matrix-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the matrix workbook (sheets "Applicability" and "Fees")
    #[arg(short, long, conflicts_with_all = ["applicability", "fees"])]
    workbook: Option<PathBuf>,

    /// Path to the applicability CSV (use together with --fees)
    #[arg(short, long, requires = "fees")]
    applicability: Option<PathBuf>,

    /// Path to the fees CSV (use together with --applicability)
    #[arg(short, long, requires = "applicability")]
    fees: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let set = match (&args.workbook, &args.applicability, &args.fees) {
        (Some(workbook), _, _) => MatrixLoader::from_workbook(workbook)
            .with_context(|| format!("Failed to load workbook: {}", workbook.display()))?,
        (None, Some(applicability), Some(fees)) => {
            MatrixLoader::from_csv_paths(applicability, fees)
                .context("Failed to load CSV matrix pair")?
        }
        _ => bail!("pass either --workbook or both --applicability and --fees"),
    };

    println!(
        "Loaded {} applicability rows and {} fee rows.",
        set.applicability.len(),
        set.fees.len()
    );
    println!();
    println!("{:<20} {:>10} {:>18}", "Client Type", "Applicable", "Missing/Zero Fee");

    let mut total_missing = 0;
    for status in status_report(&set.applicability, &set.fees) {
        total_missing += status.missing_or_zero_fee_count;
        println!(
            "{:<20} {:>10} {:>18}",
            status.client_type, status.applicable_count, status.missing_or_zero_fee_count
        );
    }

    println!();
    if total_missing == 0 {
        println!("All applicable combinations carry a positive fee.");
    } else {
        println!(
            "{} applicable combination(s) have a missing or zero fee; they will quote at 0.",
            total_missing
        );
    }

    Ok(())
}
