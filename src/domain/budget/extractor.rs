//! Budget payload extraction from raw model output.
//!
//! The analysis prompt asks the model for bare JSON, but replies often wrap
//! it in prose or code fences. The extractor takes everything between the
//! first `{` and the last `}`, parses it, and enforces the arithmetic
//! invariants before anything is allowed near storage.

use serde::Deserialize;
use thiserror::Error;

use super::{BudgetAnalysis, BudgetCategory};
use crate::domain::normalization::{normalize_lifestyle, normalize_location, round_to_nearest};

/// Figures are kept to the nearest thousand rupiah.
pub const DEFAULT_ROUNDING_INTERVAL: f64 = 1_000.0;

/// Errors that can occur while extracting a budget payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("no structured payload found in model output")]
    NoPayload,

    #[error("malformed budget payload: {0}")]
    MalformedPayload(String),

    #[error("budget payload has no categories")]
    NoCategories,

    #[error("category at position {index} has a blank name")]
    BlankCategoryName { index: usize },

    #[error("category '{category}' has invalid amount {amount}")]
    NegativeAmount { category: String, amount: f64 },

    #[error("salary must be positive, got {salary}")]
    NonPositiveSalary { salary: f64 },

    #[error("categories sum to {total} but salary is {salary} (tolerance {tolerance})")]
    UnbalancedTotal {
        salary: f64,
        total: f64,
        tolerance: f64,
    },
}

/// Wire shape of the payload the analysis prompt asks for.
#[derive(Debug, Deserialize)]
struct RawBudgetPayload {
    salary: f64,
    #[serde(default)]
    location: String,
    #[serde(default)]
    lifestyle: Option<String>,
    #[serde(default)]
    analysis: String,
    #[serde(default)]
    categories: Vec<BudgetCategory>,
}

/// Parses and validates budget proposals.
#[derive(Debug, Clone)]
pub struct BudgetExtractor {
    rounding_interval: f64,
}

impl Default for BudgetExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDING_INTERVAL)
    }
}

impl BudgetExtractor {
    /// Creates an extractor that rounds (and tolerates drift) at `rounding_interval`.
    pub fn new(rounding_interval: f64) -> Self {
        Self { rounding_interval }
    }

    /// Extracts a validated [`BudgetAnalysis`] from raw model output.
    ///
    /// # Errors
    ///
    /// - `NoPayload` when the text has no `{ ... }` span
    /// - `MalformedPayload` when that span is not the expected JSON object
    /// - any validation variant when the numbers do not add up
    pub fn extract(&self, response: &str) -> Result<BudgetAnalysis, ExtractionError> {
        let payload = locate_payload(response)?;

        let raw: RawBudgetPayload = serde_json::from_str(payload)
            .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))?;

        self.validate(raw)
    }

    fn validate(&self, raw: RawBudgetPayload) -> Result<BudgetAnalysis, ExtractionError> {
        if !raw.salary.is_finite() || raw.salary <= 0.0 {
            return Err(ExtractionError::NonPositiveSalary { salary: raw.salary });
        }
        if raw.categories.is_empty() {
            return Err(ExtractionError::NoCategories);
        }

        let mut categories = Vec::with_capacity(raw.categories.len());
        for (index, category) in raw.categories.into_iter().enumerate() {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(ExtractionError::BlankCategoryName { index });
            }
            if !category.amount.is_finite() || category.amount < 0.0 {
                return Err(ExtractionError::NegativeAmount {
                    category: name.to_string(),
                    amount: category.amount,
                });
            }
            categories.push(BudgetCategory::new(
                name,
                round_to_nearest(category.amount, self.rounding_interval),
                category.description.trim(),
            ));
        }

        let total: f64 = categories.iter().map(|c| c.amount).sum();
        let salary = round_to_nearest(raw.salary, self.rounding_interval);
        let tolerance = self.tolerance();
        if (total - salary).abs() > tolerance {
            return Err(ExtractionError::UnbalancedTotal {
                salary: raw.salary,
                total,
                tolerance,
            });
        }

        let lifestyle = raw
            .lifestyle
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(normalize_lifestyle);

        Ok(BudgetAnalysis {
            salary: raw.salary,
            location: normalize_location(&raw.location),
            lifestyle,
            analysis: raw.analysis.trim().to_string(),
            categories,
        })
    }

    /// One rounding unit; a degenerate interval still tolerates float noise.
    fn tolerance(&self) -> f64 {
        if self.rounding_interval.is_finite() && self.rounding_interval > 0.0 {
            self.rounding_interval
        } else {
            f64::EPSILON
        }
    }
}

/// Slice from the first `{` to the last `}` inclusive.
fn locate_payload(response: &str) -> Result<&str, ExtractionError> {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&response[start..=end]),
        _ => Err(ExtractionError::NoPayload),
    }
}
