//! Budget module - allocations derived from a finished intake conversation.
//!
//! - `BudgetAnalysis` / `BudgetCategory`: validated, model-derived payload
//! - `BudgetExtractor`: turns raw model output into a `BudgetAnalysis`
//! - `Budget`: the persisted, account-owned allocation

mod analysis;
mod budget;
mod extractor;

pub use analysis::{BudgetAnalysis, BudgetCategory};
pub use budget::{Budget, BudgetPeriod};
pub use extractor::{BudgetExtractor, ExtractionError, DEFAULT_ROUNDING_INTERVAL};
