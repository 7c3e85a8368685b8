use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::client_type::ClientType;
use crate::models::matrix::normalize_label;

/// User-facing rejections raised before any assembly happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("client name must not be empty")]
    EmptyClientName,

    #[error("unknown client type '{0}'")]
    UnknownClientType(String),
}

/// The accounting engagement is a plan choice: exactly zero or one variant
/// may appear on a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountingPlan {
    Monthly,
    Quarterly,
    Annual,
    #[default]
    NotApplicable,
}

impl AccountingPlan {
    pub const ALL: [AccountingPlan; 4] = [
        Self::Monthly,
        Self::Quarterly,
        Self::Annual,
        Self::NotApplicable,
    ];

    /// The matrix sub-service label this plan selects, or `None` when
    /// accounting is not part of the engagement.
    pub fn sub_service(&self) -> Option<&'static str> {
        match self {
            Self::Monthly => Some("MONTHLY ACCOUNTING"),
            Self::Quarterly => Some("QUARTERLY ACCOUNTING"),
            Self::Annual => Some("ANNUAL ACCOUNTING"),
            Self::NotApplicable => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "MONTHLY" | "MONTHLY ACCOUNTING" => Some(Self::Monthly),
            "QUARTERLY" | "QUARTERLY ACCOUNTING" => Some(Self::Quarterly),
            "ANNUAL" | "ANNUAL ACCOUNTING" => Some(Self::Annual),
            "NONE" | "NOT APPLICABLE" | "NA" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

/// Everything the operator picked on the form for one quote build.
///
/// Created fresh per submission and passed into the assembler; nothing in
/// here outlives the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub client_name: String,
    pub client_type: ClientType,
    pub accounting_plan: AccountingPlan,
    /// Opt-in event-based filings, stored normalized. A selection naming a
    /// sub-service absent from the matrix contributes nothing.
    pub event_choices: BTreeSet<String>,
    /// Single-choice variant for the profession tax category, normalized.
    pub profession_tax_choice: Option<String>,
    pub discount_percent: Decimal,
}

impl SelectionState {
    pub fn new(client_name: &str, client_type: ClientType) -> Self {
        Self {
            client_name: client_name.trim().to_string(),
            client_type,
            accounting_plan: AccountingPlan::NotApplicable,
            event_choices: BTreeSet::new(),
            profession_tax_choice: None,
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn with_accounting_plan(mut self, plan: AccountingPlan) -> Self {
        self.accounting_plan = plan;
        self
    }

    pub fn with_event_choice(mut self, sub_service: &str) -> Self {
        self.event_choices.insert(normalize_label(sub_service));
        self
    }

    pub fn with_profession_tax_choice(mut self, sub_service: &str) -> Self {
        self.profession_tax_choice = Some(normalize_label(sub_service));
        self
    }

    pub fn with_discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    /// Rejects selections no quote may be produced for.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_name.trim().is_empty() {
            return Err(ValidationError::EmptyClientName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accounting_plan_maps_to_sub_service_label() {
        assert_eq!(
            AccountingPlan::Annual.sub_service(),
            Some("ANNUAL ACCOUNTING")
        );
        assert_eq!(AccountingPlan::NotApplicable.sub_service(), None);
    }

    #[test]
    fn accounting_plan_parses_short_and_full_forms() {
        assert_eq!(AccountingPlan::parse("monthly"), Some(AccountingPlan::Monthly));
        assert_eq!(
            AccountingPlan::parse("Annual Accounting"),
            Some(AccountingPlan::Annual)
        );
        assert_eq!(
            AccountingPlan::parse("not applicable"),
            Some(AccountingPlan::NotApplicable)
        );
        assert_eq!(AccountingPlan::parse("weekly"), None);
    }

    #[test]
    fn validate_rejects_blank_client_name() {
        let selection = SelectionState::new("   ", ClientType::Llp);

        assert_eq!(selection.validate(), Err(ValidationError::EmptyClientName));
    }

    #[test]
    fn validate_accepts_named_client() {
        let selection = SelectionState::new("Acme Traders", ClientType::Llp);

        assert_eq!(selection.validate(), Ok(()));
    }

    #[test]
    fn event_choices_are_normalized_and_deduplicated() {
        let selection = SelectionState::new("Acme", ClientType::Llp)
            .with_event_choice(" gst registration ")
            .with_event_choice("GST REGISTRATION");

        assert_eq!(selection.event_choices.len(), 1);
        assert!(selection.event_choices.contains("GST REGISTRATION"));
    }
}
