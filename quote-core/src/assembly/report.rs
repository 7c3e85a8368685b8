//! Data-quality reporting over the loaded matrices.
//!
//! An applicable combination without a positive fee is not an error (it
//! quotes at zero), but the operator needs to see how much of the matrix is
//! in that state before trusting a quotation.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ApplicabilityRow, FeeRow, MatrixKey};

/// Per-client-type fee coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTypeStatus {
    /// Normalized client type label as it appears in the matrix.
    pub client_type: String,
    /// Rows marked applicable for this client type.
    pub applicable_count: usize,
    /// Applicable rows whose fee is absent or zero.
    pub missing_or_zero_fee_count: usize,
}

/// Summarizes fee coverage for every client type in the applicability
/// matrix, sorted by client type.
///
/// Unlike the quote build, this view tolerates duplicate fee keys: a row
/// counts as covered when any matching fee row is positive. The hard
/// uniqueness check belongs to the join, not to this report.
pub fn status_report(
    applicability: &[ApplicabilityRow],
    fees: &[FeeRow],
) -> Vec<ClientTypeStatus> {
    let mut best_fee: HashMap<MatrixKey, Decimal> = HashMap::with_capacity(fees.len());
    for fee in fees {
        let entry = best_fee.entry(fee.key()).or_insert(Decimal::ZERO);
        if fee.fee_inr > *entry {
            *entry = fee.fee_inr;
        }
    }

    let mut by_client_type: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for row in applicability {
        let counts = by_client_type.entry(row.client_type.as_str()).or_default();
        if !row.applicable {
            continue;
        }
        counts.0 += 1;
        let covered = best_fee
            .get(&row.key())
            .is_some_and(|fee| *fee > Decimal::ZERO);
        if !covered {
            counts.1 += 1;
        }
    }

    by_client_type
        .into_iter()
        .map(|(client_type, (applicable, missing))| ClientTypeStatus {
            client_type: client_type.to_string(),
            applicable_count: applicable,
            missing_or_zero_fee_count: missing,
        })
        .collect()
}
