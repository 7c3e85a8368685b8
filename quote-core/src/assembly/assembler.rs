//! Rule-driven quote assembly.
//!
//! Given the loaded matrices, a rule set, and the operator's selections,
//! the assembler produces the exact line set for one quotation:
//!
//! 1. Keep rows applicable to the selected client type.
//! 2. Single-choice categories (accounting, profession tax): keep only the
//!    selected variant, or drop the category when nothing was selected.
//! 3. Multi-choice category (event-based filings): keep only the opted-in
//!    sub-services, or drop the category when none were.
//! 4. Forced recategorization: sub-services in the fixed event-triggered
//!    set move to the separate event section, excluded from the annual
//!    total, whatever category the matrix tagged them under.
//! 5. Left-join fees; a missing fee quotes at zero but the line stays
//!    visible. Duplicate fee keys abort the build.
//! 6. Title-case labels for display, sort by the normalized key, total the
//!    annual lines.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{
//!     AccountingPlan, ApplicabilityRow, ClientType, FeeRow, QuoteAssembler, RuleSet,
//!     SelectionState,
//! };
//!
//! let applicability = vec![
//!     ApplicabilityRow::new("ACCOUNTING", "MONTHLY ACCOUNTING", "LLP", true),
//!     ApplicabilityRow::new("ACCOUNTING", "ANNUAL ACCOUNTING", "LLP", true),
//! ];
//! let fees = vec![
//!     FeeRow::new("ACCOUNTING", "MONTHLY ACCOUNTING", "LLP", dec!(12000)),
//!     FeeRow::new("ACCOUNTING", "ANNUAL ACCOUNTING", "LLP", dec!(5000)),
//! ];
//! let rules = RuleSet::default();
//!
//! let selection = SelectionState::new("Acme LLP", ClientType::Llp)
//!     .with_accounting_plan(AccountingPlan::Annual);
//!
//! let quote = QuoteAssembler::new(&applicability, &fees, &rules)
//!     .assemble(&selection)
//!     .unwrap();
//!
//! assert_eq!(quote.lines.len(), 1);
//! assert_eq!(quote.lines[0].service, "Accounting");
//! assert_eq!(quote.lines[0].details, "Annual Accounting");
//! assert_eq!(quote.total, dec!(5000));
//! ```

use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::assembly::display::display_case;
use crate::assembly::rules::RuleSet;
use crate::models::{ApplicabilityRow, AssembledQuote, FeeRow, MatrixKey, QuoteLine, SelectionState};

/// Errors that abort a quote build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// The fee matrix has more than one row for a join key. The join is
    /// contractually one-to-one; picking a row silently would hide a data
    /// entry mistake.
    #[error(
        "duplicate fee row for ({service} / {sub_service} / {client_type}); \
         the fee matrix must list each combination at most once"
    )]
    DuplicateFeeKey {
        service: String,
        sub_service: String,
        client_type: String,
    },
}

/// Assembles quotations from the loaded matrices.
///
/// The assembler borrows the matrices and rules; it mutates nothing, so one
/// instance can serve any number of builds and identical selections always
/// produce identical output.
#[derive(Debug, Clone)]
pub struct QuoteAssembler<'a> {
    applicability: &'a [ApplicabilityRow],
    fees: &'a [FeeRow],
    rules: &'a RuleSet,
}

impl<'a> QuoteAssembler<'a> {
    pub fn new(
        applicability: &'a [ApplicabilityRow],
        fees: &'a [FeeRow],
        rules: &'a RuleSet,
    ) -> Self {
        Self {
            applicability,
            fees,
            rules,
        }
    }

    /// Builds the quotation for one selection.
    ///
    /// A client type with nothing applicable yields an empty quote with a
    /// zero total; that is a valid outcome, not an error. A selection
    /// naming a sub-service the matrix does not carry contributes nothing.
    ///
    /// # Errors
    ///
    /// [`AssembleError::DuplicateFeeKey`] when the fee matrix lists a join
    /// key more than once.
    pub fn assemble(
        &self,
        selection: &SelectionState,
    ) -> Result<AssembledQuote, AssembleError> {
        let fee_index = self.build_fee_index()?;

        let mut survivors: Vec<&ApplicabilityRow> = self
            .applicability
            .iter()
            .filter(|row| {
                row.applicable && row.client_type == selection.client_type.as_str()
            })
            .filter(|row| self.passes_single_choice(row, selection))
            .filter(|row| self.passes_multi_choice(row, selection))
            .collect();

        // Deterministic output order, on the normalized key rather than the
        // display text.
        survivors.sort_by(|a, b| {
            (&a.service, &a.sub_service).cmp(&(&b.service, &b.sub_service))
        });

        let mut lines = Vec::new();
        let mut event_lines = Vec::new();
        let mut total = Decimal::ZERO;

        for row in survivors {
            let fee = fee_index
                .get(&row.key())
                .copied()
                .unwrap_or(Decimal::ZERO);
            let line = QuoteLine::new(
                display_case(&row.service, self.rules),
                display_case(&row.sub_service, self.rules),
                fee,
            );

            if self.rules.forced_event_sub_services.contains(&row.sub_service) {
                event_lines.push(line);
            } else {
                total += fee;
                lines.push(line);
            }
        }

        debug!(
            client_type = selection.client_type.as_str(),
            annual_lines = lines.len(),
            event_lines = event_lines.len(),
            %total,
            "assembled quote"
        );

        Ok(AssembledQuote {
            lines,
            event_lines,
            total,
        })
    }

    /// Indexes the fee matrix by join key, rejecting duplicates.
    fn build_fee_index(&self) -> Result<HashMap<MatrixKey, Decimal>, AssembleError> {
        let mut index = HashMap::with_capacity(self.fees.len());
        for fee in self.fees {
            if index.insert(fee.key(), fee.fee_inr).is_some() {
                return Err(AssembleError::DuplicateFeeKey {
                    service: fee.service.clone(),
                    sub_service: fee.sub_service.clone(),
                    client_type: fee.client_type.clone(),
                });
            }
        }
        Ok(index)
    }

    /// Single-choice categories carry exactly zero or one variant: the row
    /// survives only when its sub-service is the selected one.
    fn passes_single_choice(
        &self,
        row: &ApplicabilityRow,
        selection: &SelectionState,
    ) -> bool {
        if row.service == self.rules.accounting_category {
            return selection.accounting_plan.sub_service() == Some(row.sub_service.as_str());
        }
        if row.service == self.rules.profession_tax_category {
            return selection.profession_tax_choice.as_deref() == Some(row.sub_service.as_str());
        }
        true
    }

    /// The event category is opt-in: only sub-services the operator picked
    /// survive, and an empty pick drops the category.
    fn passes_multi_choice(
        &self,
        row: &ApplicabilityRow,
        selection: &SelectionState,
    ) -> bool {
        if row.service == self.rules.event_category {
            return selection.event_choices.contains(&row.sub_service);
        }
        true
    }
}
