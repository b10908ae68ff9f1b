//! Income model
//!
//! An income is a discrete amount of money received on a date. Part of
//! it may be earmarked to budgets; `allocated_amount` tracks how much.
//! Only the allocation engine mutates `allocated_amount`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::Money;

/// A recorded income
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,

    /// Total amount received
    pub amount: Money,

    /// Date the income was received
    pub date: NaiveDate,

    /// Where the money came from (employer, client, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Income category name (weak reference into the category set)
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Portion of `amount` already earmarked to budgets.
    /// Invariant: 0 <= allocated_amount <= amount.
    #[serde(default)]
    pub allocated_amount: Money,
}

impl Income {
    /// Create a new income with nothing allocated yet
    pub fn new(amount: Money, date: NaiveDate) -> Self {
        Self {
            id: IncomeId::new(),
            amount,
            date,
            source: None,
            category: String::new(),
            description: String::new(),
            allocated_amount: Money::zero(),
        }
    }

    /// The unallocated balance still available for funding budgets
    pub fn available(&self) -> Money {
        self.amount - self.allocated_amount
    }

    /// Check whether any balance is still available
    pub fn has_available(&self) -> bool {
        self.available().is_positive()
    }

    /// Validate the income invariants
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        if self.allocated_amount.is_negative() {
            return Err(IncomeValidationError::NegativeAllocated);
        }
        if self.allocated_amount > self.amount {
            return Err(IncomeValidationError::AllocatedExceedsAmount);
        }
        Ok(())
    }
}

/// Validation errors for incomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NonPositiveAmount,
    NegativeAllocated,
    AllocatedExceedsAmount,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Income amount must be positive"),
            Self::NegativeAllocated => write!(f, "Allocated amount cannot be negative"),
            Self::AllocatedExceedsAmount => {
                write!(f, "Allocated amount cannot exceed the income amount")
            }
        }
    }
}

impl std::error::Error for IncomeValidationError {}
