//! Persisted budget allocation.

use serde::{Deserialize, Serialize};

use super::{BudgetAnalysis, BudgetCategory};
use crate::domain::foundation::{AccountId, BudgetId, DomainError, ErrorCode, Timestamp};

/// Period a budget covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Monthly => "monthly",
        }
    }
}

/// An account-owned allocation for one category over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub account_id: AccountId,
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub description: String,
    pub created_at: Timestamp,
}

impl Budget {
    /// Creates a monthly budget covering the calendar month containing `anchor`.
    pub fn monthly(
        account_id: AccountId,
        category: &BudgetCategory,
        anchor: Timestamp,
    ) -> Result<Self, DomainError> {
        let (start_date, end_date) = month_bounds(anchor)?;
        Ok(Self {
            id: BudgetId::new(),
            account_id,
            category: category.name.clone(),
            amount: category.amount,
            period: BudgetPeriod::Monthly,
            start_date,
            end_date,
            description: category.description.clone(),
            created_at: Timestamp::now(),
        })
    }

    /// One monthly budget per category of `analysis`, in category order.
    pub fn from_analysis(
        account_id: &AccountId,
        analysis: &BudgetAnalysis,
        anchor: Timestamp,
    ) -> Result<Vec<Self>, DomainError> {
        analysis
            .categories
            .iter()
            .map(|category| Self::monthly(account_id.clone(), category, anchor))
            .collect()
    }
}

fn month_bounds(anchor: Timestamp) -> Result<(Timestamp, Timestamp), DomainError> {
    match (anchor.start_of_month(), anchor.end_of_month()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(DomainError::new(
            ErrorCode::InternalError,
            "Cannot compute calendar month bounds",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Datelike, Utc};

    fn anchor() -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2024-05-20T09:15:00Z")
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn analysis() -> BudgetAnalysis {
        BudgetAnalysis {
            salary: 5_000_000.0,
            location: "Bandung".to_string(),
            lifestyle: None,
            analysis: "cukup".to_string(),
            categories: vec![
                BudgetCategory::new("Makan", 2_000_000.0, "makanan sehari-hari"),
                BudgetCategory::new("Tabungan", 3_000_000.0, "tabungan & investasi"),
            ],
        }
    }

    #[test]
    fn monthly_budget_spans_the_anchor_month() {
        let account = AccountId::new("acct-1").unwrap();
        let category = BudgetCategory::new("Makan", 2_000_000.0, "makanan");
        let budget = Budget::monthly(account, &category, anchor()).unwrap();

        assert_eq!(budget.period, BudgetPeriod::Monthly);
        assert_eq!(budget.start_date.as_datetime().day(), 1);
        assert_eq!(budget.start_date.as_datetime().month(), 5);
        assert_eq!(budget.end_date.as_datetime().day(), 31);
        assert_eq!(budget.end_date.as_datetime().month(), 5);
        assert_eq!(budget.amount, 2_000_000.0);
        assert_eq!(budget.description, "makanan");
    }

    #[test]
    fn from_analysis_preserves_category_order() {
        let account = AccountId::new("acct-1").unwrap();
        let budgets = Budget::from_analysis(&account, &analysis(), anchor()).unwrap();

        let names: Vec<_> = budgets.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Makan", "Tabungan"]);
        assert!(budgets.iter().all(|b| b.account_id == account));
    }

    #[test]
    fn period_serializes_lowercase() {
        let json = serde_json::to_string(&BudgetPeriod::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");
        assert_eq!(BudgetPeriod::Monthly.as_str(), "monthly");
    }
}
