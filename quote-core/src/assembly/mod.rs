pub mod assembler;
pub mod common;
pub mod display;
pub mod report;
pub mod rules;
pub mod totals;

pub use assembler::{AssembleError, QuoteAssembler};
pub use report::{ClientTypeStatus, status_report};
pub use rules::RuleSet;
pub use totals::compute_totals;
