mod client_type;
mod matrix;
mod quote;
mod selection;

pub use client_type::ClientType;
pub use matrix::{ApplicabilityRow, FeeRow, MatrixKey, normalize_label, parse_applicable_flag};
pub use quote::{AssembledQuote, QuoteLine, QuoteTotals};
pub use selection::{AccountingPlan, SelectionState, ValidationError};
