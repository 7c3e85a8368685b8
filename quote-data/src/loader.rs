//! Matrix ingestion and normalization.
//!
//! The firm maintains its service matrix as a workbook with two named
//! sheets, `Applicability` and `Fees`, or equivalently as a pair of CSV
//! files with the same columns:
//!
//! | Column | Sheet | Notes |
//! |--------------|---------------|--------------------------------------------|
//! | `Service` | both | Category label |
//! | `SubService` | both | May be blank (service with no breakdown) |
//! | `ClientType` | both | One of the ten supported constitutions |
//! | `Applicable` | Applicability | Truthy spellings: TRUE / 1 / YES, any case |
//! | `FeeINR` | Fees | Annual fee; blank or unparsable loads as 0 |
//!
//! Every key field is normalized (trimmed, upper-cased) on the way in, so
//! downstream joins never depend on how the spreadsheet was typed. Loading
//! is a pure transform: any failure leaves nothing half-loaded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use quote_core::{ApplicabilityRow, FeeRow, parse_applicable_flag};

/// Sheet / section name for the applicability table.
pub const APPLICABILITY_SECTION: &str = "Applicability";
/// Sheet / section name for the fee table.
pub const FEES_SECTION: &str = "Fees";

/// Errors that prevent a matrix from loading. All of them are fatal to the
/// quote build; there is no usable partial matrix.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read workbook '{path}': {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("workbook has no '{0}' sheet")]
    MissingSection(String),

    #[error("'{section}' is missing required column '{column}'")]
    MissingColumn {
        section: String,
        column: &'static str,
    },

    #[error("CSV parse error in '{section}': {source}")]
    Csv {
        section: String,
        #[source]
        source: csv::Error,
    },
}

/// Both matrices, normalized and ready for the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSet {
    pub applicability: Vec<ApplicabilityRow>,
    pub fees: Vec<FeeRow>,
}

// ---------------------------------------------------------------------------
// Serde rows mirroring the CSV layout; raw strings, normalized on convert
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApplicabilityCsvRow {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "SubService", default)]
    sub_service: Option<String>,
    #[serde(rename = "ClientType")]
    client_type: String,
    #[serde(rename = "Applicable", default)]
    applicable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeeCsvRow {
    #[serde(rename = "Service")]
    service: String,
    #[serde(rename = "SubService", default)]
    sub_service: Option<String>,
    #[serde(rename = "ClientType")]
    client_type: String,
    #[serde(rename = "FeeINR", default)]
    fee_inr: Option<String>,
}

/// Parses a fee cell. Blank or unparsable values quote as zero; that is a
/// data-quality condition reported elsewhere, not a load failure.
fn parse_fee(raw: &str) -> Decimal {
    raw.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// Loader for the service and fee matrices.
pub struct MatrixLoader;

impl MatrixLoader {
    /// Loads both sections from an Excel workbook.
    ///
    /// # Errors
    ///
    /// [`LoadError`] when the file cannot be opened, either named sheet is
    /// absent, or a sheet lacks a required column.
    pub fn from_workbook(path: &Path) -> Result<MatrixSet, LoadError> {
        let path_display = path.display().to_string();
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| LoadError::Workbook {
            path: path_display.clone(),
            source,
        })?;

        let applicability_range = Self::sheet_range(&mut workbook, &path_display, APPLICABILITY_SECTION)?;
        let fees_range = Self::sheet_range(&mut workbook, &path_display, FEES_SECTION)?;

        let applicability = Self::applicability_from_range(&applicability_range)?;
        let fees = Self::fees_from_range(&fees_range)?;

        info!(
            path = %path_display,
            applicability_rows = applicability.len(),
            fee_rows = fees.len(),
            "loaded matrix workbook"
        );

        Ok(MatrixSet {
            applicability,
            fees,
        })
    }

    /// Loads both sections from a pair of CSV files.
    pub fn from_csv_paths(
        applicability_path: &Path,
        fees_path: &Path,
    ) -> Result<MatrixSet, LoadError> {
        let applicability_file = File::open(applicability_path).map_err(|source| LoadError::Open {
            path: applicability_path.display().to_string(),
            source,
        })?;
        let fees_file = File::open(fees_path).map_err(|source| LoadError::Open {
            path: fees_path.display().to_string(),
            source,
        })?;
        Self::from_csv_readers(applicability_file, fees_file)
    }

    /// Loads both sections from CSV readers. Rows come back in file order.
    pub fn from_csv_readers<R1: Read, R2: Read>(
        applicability: R1,
        fees: R2,
    ) -> Result<MatrixSet, LoadError> {
        Ok(MatrixSet {
            applicability: Self::parse_applicability_csv(applicability)?,
            fees: Self::parse_fees_csv(fees)?,
        })
    }

    pub fn parse_applicability_csv<R: Read>(
        reader: R,
    ) -> Result<Vec<ApplicabilityRow>, LoadError> {
        Self::csv_reader(reader)
            .deserialize::<ApplicabilityCsvRow>()
            .map(|result| {
                let row = result.map_err(|source| LoadError::Csv {
                    section: APPLICABILITY_SECTION.to_string(),
                    source,
                })?;
                Ok(ApplicabilityRow::new(
                    &row.service,
                    row.sub_service.as_deref().unwrap_or(""),
                    &row.client_type,
                    parse_applicable_flag(row.applicable.as_deref().unwrap_or("")),
                ))
            })
            .collect()
    }

    pub fn parse_fees_csv<R: Read>(reader: R) -> Result<Vec<FeeRow>, LoadError> {
        Self::csv_reader(reader)
            .deserialize::<FeeCsvRow>()
            .map(|result| {
                let row = result.map_err(|source| LoadError::Csv {
                    section: FEES_SECTION.to_string(),
                    source,
                })?;
                Ok(FeeRow::new(
                    &row.service,
                    row.sub_service.as_deref().unwrap_or(""),
                    &row.client_type,
                    parse_fee(row.fee_inr.as_deref().unwrap_or("")),
                ))
            })
            .collect()
    }

    fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All) // tolerate whitespace around values
            .flexible(false) // strict column count
            .from_reader(reader)
    }

    fn sheet_range(
        workbook: &mut Xlsx<std::io::BufReader<File>>,
        path: &str,
        sheet: &str,
    ) -> Result<calamine::Range<Data>, LoadError> {
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(LoadError::MissingSection(sheet.to_string()));
        }
        workbook
            .worksheet_range(sheet)
            .map_err(|source| LoadError::Workbook {
                path: path.to_string(),
                source,
            })
    }

    fn applicability_from_range(
        range: &calamine::Range<Data>,
    ) -> Result<Vec<ApplicabilityRow>, LoadError> {
        let header = SheetHeader::locate(
            range,
            APPLICABILITY_SECTION,
            &["Service", "SubService", "ClientType", "Applicable"],
        )?;

        Ok(range
            .rows()
            .skip(1)
            .filter(|cells| !header.row_is_blank(cells))
            .map(|cells| {
                ApplicabilityRow::new(
                    &header.text(cells, "Service"),
                    &header.text(cells, "SubService"),
                    &header.text(cells, "ClientType"),
                    parse_applicable_flag(&header.text(cells, "Applicable")),
                )
            })
            .collect())
    }

    fn fees_from_range(range: &calamine::Range<Data>) -> Result<Vec<FeeRow>, LoadError> {
        let header = SheetHeader::locate(
            range,
            FEES_SECTION,
            &["Service", "SubService", "ClientType", "FeeINR"],
        )?;

        Ok(range
            .rows()
            .skip(1)
            .filter(|cells| !header.row_is_blank(cells))
            .map(|cells| {
                FeeRow::new(
                    &header.text(cells, "Service"),
                    &header.text(cells, "SubService"),
                    &header.text(cells, "ClientType"),
                    header.fee(cells),
                )
            })
            .collect())
    }
}

/// Column positions resolved from a sheet's header row. Column order in the
/// workbook does not matter; names do.
struct SheetHeader {
    columns: Vec<(&'static str, usize)>,
}

impl SheetHeader {
    fn locate(
        range: &calamine::Range<Data>,
        section: &str,
        required: &[&'static str],
    ) -> Result<Self, LoadError> {
        let header_row = range
            .rows()
            .next()
            .ok_or_else(|| LoadError::MissingColumn {
                section: section.to_string(),
                column: required[0],
            })?;

        let mut columns = Vec::with_capacity(required.len());
        for column in required {
            let index = header_row
                .iter()
                .position(|cell| {
                    cell.as_string()
                        .is_some_and(|name| name.trim().eq_ignore_ascii_case(column))
                })
                .ok_or_else(|| LoadError::MissingColumn {
                    section: section.to_string(),
                    column,
                })?;
            columns.push((*column, index));
        }

        Ok(Self { columns })
    }

    fn index(&self, column: &str) -> usize {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, index)| *index)
            .unwrap_or(usize::MAX)
    }

    fn text(
        &self,
        cells: &[Data],
        column: &str,
    ) -> String {
        cells
            .get(self.index(column))
            .and_then(|cell| cell.as_string())
            .unwrap_or_default()
    }

    fn fee(
        &self,
        cells: &[Data],
    ) -> Decimal {
        let cell = match cells.get(self.index("FeeINR")) {
            Some(cell) => cell,
            None => return Decimal::ZERO,
        };
        // Numeric cells come through as floats; anything typed as text goes
        // through the string parser.
        if let Some(value) = cell.as_f64() {
            return Decimal::from_f64(value).unwrap_or(Decimal::ZERO);
        }
        parse_fee(&cell.as_string().unwrap_or_default())
    }

    fn row_is_blank(
        &self,
        cells: &[Data],
    ) -> bool {
        self.columns
            .iter()
            .all(|(_, index)| {
                cells
                    .get(*index)
                    .map(|cell| cell.is_empty())
                    .unwrap_or(true)
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const APPLICABILITY_CSV: &str = "\
Service,SubService,ClientType,Applicable
ACCOUNTING,MONTHLY ACCOUNTING,LLP,TRUE
accounting , annual accounting , llp ,yes
GST RETURNS,GSTR-1 FILING,LLP,1
GST RETURNS,GSTR-9 FILING,LLP,FALSE
ITR FILING,,LLP,TRUE
";

    const FEES_CSV: &str = "\
Service,SubService,ClientType,FeeINR
ACCOUNTING,MONTHLY ACCOUNTING,LLP,12000
ACCOUNTING,ANNUAL ACCOUNTING,LLP,5000
GST RETURNS,GSTR-1 FILING,LLP,\"9,000\"
ITR FILING,,LLP,
";

    #[test]
    fn applicability_rows_load_normalized() {
        let rows = MatrixLoader::parse_applicability_csv(APPLICABILITY_CSV.as_bytes()).unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows[1],
            ApplicabilityRow::new("ACCOUNTING", "ANNUAL ACCOUNTING", "LLP", true)
        );
        assert!(rows[2].applicable); // "1"
        assert!(!rows[3].applicable); // FALSE
    }

    #[test]
    fn blank_sub_service_loads_as_empty_string() {
        let rows = MatrixLoader::parse_applicability_csv(APPLICABILITY_CSV.as_bytes()).unwrap();

        assert_eq!(rows[4].sub_service, "");
    }

    #[test]
    fn fee_rows_parse_amounts_and_thousand_separators() {
        let rows = MatrixLoader::parse_fees_csv(FEES_CSV.as_bytes()).unwrap();

        assert_eq!(rows[0].fee_inr, dec!(12000));
        assert_eq!(rows[2].fee_inr, dec!(9000));
    }

    #[test]
    fn absent_fee_loads_as_zero() {
        let rows = MatrixLoader::parse_fees_csv(FEES_CSV.as_bytes()).unwrap();

        assert_eq!(rows[3].fee_inr, dec!(0));
    }

    #[test]
    fn unparsable_fee_loads_as_zero() {
        let csv = "Service,SubService,ClientType,FeeINR\nITR FILING,,LLP,on request\n";

        let rows = MatrixLoader::parse_fees_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].fee_inr, dec!(0));
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let csv = "Service,SubService,FeeINR\nITR FILING,,5000\n";

        let result = MatrixLoader::parse_fees_csv(csv.as_bytes());

        assert!(matches!(result, Err(LoadError::Csv { .. })));
    }

    #[test]
    fn csv_pair_loads_both_sections() {
        let set =
            MatrixLoader::from_csv_readers(APPLICABILITY_CSV.as_bytes(), FEES_CSV.as_bytes())
                .unwrap();

        assert_eq!(set.applicability.len(), 5);
        assert_eq!(set.fees.len(), 4);
    }

    #[test]
    fn parse_fee_handles_blank_and_garbage() {
        assert_eq!(parse_fee(""), dec!(0));
        assert_eq!(parse_fee("  "), dec!(0));
        assert_eq!(parse_fee("n/a"), dec!(0));
        assert_eq!(parse_fee(" 1,50,000 "), dec!(150000));
    }
}
