use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical form for every joinable field: trimmed and upper-cased.
///
/// Both matrix tables go through this at load time, so the assembler can
/// compare keys with plain equality regardless of how the spreadsheet was
/// typed in.
pub fn normalize_label(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Parses the `Applicable` column. Only a small set of truthy spellings
/// count; everything else (including blanks) is false.
pub fn parse_applicable_flag(s: &str) -> bool {
    matches!(normalize_label(s).as_str(), "TRUE" | "1" | "YES")
}

/// The join key shared by both matrix tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixKey {
    pub service: String,
    pub sub_service: String,
    pub client_type: String,
}

/// One row of the applicability matrix: this service / sub-service
/// combination is offered to this client type.
///
/// Fields are stored in normalized form. `sub_service` is an empty string
/// when the service has no sub-service breakdown, never a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicabilityRow {
    pub service: String,
    pub sub_service: String,
    pub client_type: String,
    pub applicable: bool,
}

impl ApplicabilityRow {
    pub fn new(
        service: &str,
        sub_service: &str,
        client_type: &str,
        applicable: bool,
    ) -> Self {
        Self {
            service: normalize_label(service),
            sub_service: normalize_label(sub_service),
            client_type: normalize_label(client_type),
            applicable,
        }
    }

    pub fn key(&self) -> MatrixKey {
        MatrixKey {
            service: self.service.clone(),
            sub_service: self.sub_service.clone(),
            client_type: self.client_type.clone(),
        }
    }
}

/// One row of the fee matrix: the annual fee for one applicability
/// combination. A combination missing from this table quotes at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRow {
    pub service: String,
    pub sub_service: String,
    pub client_type: String,
    pub fee_inr: Decimal,
}

impl FeeRow {
    pub fn new(
        service: &str,
        sub_service: &str,
        client_type: &str,
        fee_inr: Decimal,
    ) -> Self {
        Self {
            service: normalize_label(service),
            sub_service: normalize_label(sub_service),
            client_type: normalize_label(client_type),
            fee_inr,
        }
    }

    pub fn key(&self) -> MatrixKey {
        MatrixKey {
            service: self.service.clone(),
            sub_service: self.sub_service.clone(),
            client_type: self.client_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn normalize_label_trims_and_uppercases() {
        assert_eq!(normalize_label("  gst returns "), "GST RETURNS");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn parse_applicable_flag_accepts_truthy_spellings() {
        assert!(parse_applicable_flag("TRUE"));
        assert!(parse_applicable_flag("true"));
        assert!(parse_applicable_flag(" Yes "));
        assert!(parse_applicable_flag("1"));
    }

    #[test]
    fn parse_applicable_flag_rejects_everything_else() {
        assert!(!parse_applicable_flag("FALSE"));
        assert!(!parse_applicable_flag("0"));
        assert!(!parse_applicable_flag(""));
        assert!(!parse_applicable_flag("y"));
    }

    #[test]
    fn rows_normalize_on_construction() {
        let row = ApplicabilityRow::new(" accounting ", "monthly accounting", " llp", true);

        assert_eq!(row.service, "ACCOUNTING");
        assert_eq!(row.sub_service, "MONTHLY ACCOUNTING");
        assert_eq!(row.client_type, "LLP");
    }

    #[test]
    fn matching_rows_share_a_key() {
        let app = ApplicabilityRow::new("GST RETURNS", "GSTR-1", "LLP", true);
        let fee = FeeRow::new("gst returns", "gstr-1", "llp", dec!(12000));

        assert_eq!(app.key(), fee.key());
    }
}
