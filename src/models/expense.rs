//! Expense model
//!
//! An expense optionally links to a budget; linked expenses count
//! against that budget's spent total. The spend tracker in the expense
//! service is the only code path that keeps the pair in sync.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    pub amount: Money,

    pub date: NaiveDate,

    /// Expense category name (weak reference into the category set)
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Budget this expense counts against, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,
}

impl Expense {
    /// Create a new unlinked expense
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            date,
            category: String::new(),
            description: String::new(),
            vendor: None,
            budget_id: None,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be positive"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_unlinked() {
        let expense = Expense::new(
            Money::from_cents(4500),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        );
        assert!(expense.budget_id.is_none());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero() {
        let expense = Expense::new(Money::zero(), NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_budget_link_serialization() {
        let mut expense = Expense::new(
            Money::from_cents(100),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        );
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("budgetId").is_none());

        expense.budget_id = Some(BudgetId::new());
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("budgetId").is_some());
    }
}
