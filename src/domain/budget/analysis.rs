//! Model-derived budget analysis.

use serde::{Deserialize, Serialize};

use crate::domain::normalization::Lifestyle;

/// One allocation line proposed by the model.
///
/// Transient: each category becomes a persisted `Budget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl BudgetCategory {
    pub fn new(name: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            description: description.into(),
        }
    }
}

/// A validated budget proposal.
///
/// Category amounts are already rounded and sum to `salary` within one
/// rounding interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub salary: f64,
    /// Canonical city name.
    pub location: String,
    pub lifestyle: Option<Lifestyle>,
    /// Human-readable rationale written by the model.
    pub analysis: String,
    pub categories: Vec<BudgetCategory>,
}

impl BudgetAnalysis {
    /// Sum of all category amounts.
    pub fn total_allocated(&self) -> f64 {
        self.categories.iter().map(|c| c.amount).sum()
    }
}
