//! Business-rule configuration for quote assembly.
//!
//! The built-in default encodes the firm's current rules: which service
//! categories are plan choices, which are opt-in add-ons, which sub-services
//! are event-triggered regardless of tagging, and how labels are cased on
//! the printed document. All of it can be overridden from a TOML file, so a
//! rule change does not require a release.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::normalize_label;

/// The rule tables driving one assembly run.
///
/// Category and sub-service labels are held in normalized (trimmed,
/// upper-cased) form; [`RuleSet::normalized`] re-establishes that after
/// deserializing an override file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Single-choice category driven by the accounting plan selection.
    pub accounting_category: String,
    /// Single-choice category driven by the profession tax selection.
    pub profession_tax_category: String,
    /// Multi-choice category: any number of sub-services may be opted in.
    pub event_category: String,
    /// Sub-services always reported in the event-triggered section and
    /// excluded from the annual total, whatever category tagged them.
    pub forced_event_sub_services: BTreeSet<String>,
    /// Tokens restored to upper case after title-casing.
    pub acronyms: BTreeSet<String>,
    /// Exact label renames, keyed by normalized label. Take precedence over
    /// the acronym rule.
    pub display_overrides: BTreeMap<String, String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            accounting_category: "ACCOUNTING".to_string(),
            profession_tax_category: "PROFESSION TAX RETURNS".to_string(),
            event_category: "EVENT BASED FILINGS".to_string(),
            forced_event_sub_services: ["FORM 26QB", "FORM 26QC", "FORM 26QD"]
                .into_iter()
                .map(String::from)
                .collect(),
            acronyms: [
                "GST", "GSTR", "TDS", "TCS", "ITR", "ROC", "MCA", "LLP", "HUF", "AOP", "BOI",
                "PF", "ESI", "PT", "DIN", "DSC", "KYC", "AOC", "MGT", "ADT", "DIR", "TAN",
                "PAN", "MSME", "DPT", "LUT",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            display_overrides: [
                ("E-WAY BILL", "e-Way Bill"),
                ("E-INVOICING", "e-Invoicing"),
                ("FORM 26QB", "Form 26QB"),
                ("FORM 26QC", "Form 26QC"),
                ("FORM 26QD", "Form 26QD"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        }
    }
}

impl RuleSet {
    /// Returns the rule set with every label field re-normalized. Override
    /// files are hand-typed; this keeps the assembler's equality checks
    /// honest regardless of how they were cased.
    pub fn normalized(self) -> Self {
        Self {
            accounting_category: normalize_label(&self.accounting_category),
            profession_tax_category: normalize_label(&self.profession_tax_category),
            event_category: normalize_label(&self.event_category),
            forced_event_sub_services: self
                .forced_event_sub_services
                .iter()
                .map(|s| normalize_label(s))
                .collect(),
            acronyms: self.acronyms.iter().map(|s| normalize_label(s)).collect(),
            display_overrides: self
                .display_overrides
                .into_iter()
                .map(|(k, v)| (normalize_label(&k), v))
                .collect(),
        }
    }

    pub fn is_single_choice_category(&self, service: &str) -> bool {
        service == self.accounting_category || service == self.profession_tax_category
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_rules_cover_the_firm_categories() {
        let rules = RuleSet::default();

        assert!(rules.is_single_choice_category("ACCOUNTING"));
        assert!(rules.is_single_choice_category("PROFESSION TAX RETURNS"));
        assert!(!rules.is_single_choice_category("GST RETURNS"));
        assert_eq!(rules.event_category, "EVENT BASED FILINGS");
    }

    #[test]
    fn forced_set_contains_event_triggered_tds_forms() {
        let rules = RuleSet::default();

        for form in ["FORM 26QB", "FORM 26QC", "FORM 26QD"] {
            assert!(rules.forced_event_sub_services.contains(form));
        }
    }

    #[test]
    fn normalized_fixes_hand_typed_labels() {
        let rules = RuleSet {
            accounting_category: " accounting ".to_string(),
            ..RuleSet::default()
        }
        .normalized();

        assert_eq!(rules.accounting_category, "ACCOUNTING");
    }
}
