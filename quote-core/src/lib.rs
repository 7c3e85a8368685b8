pub mod assembly;
pub mod models;

pub use assembly::{
    AssembleError, ClientTypeStatus, QuoteAssembler, RuleSet, compute_totals, status_report,
};
pub use models::*;
