//! Budget, allocation record, and status models
//!
//! A budget is funded by earmarking income through allocation records.
//! Records are immutable provenance: `funded_amount` must equal the sum
//! of all record amounts at all times. Moving money between budgets
//! appends offsetting records instead of editing history, so a record
//! amount may be negative (a transfer out).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AllocationId, BudgetId, IncomeId};
use super::money::Money;

/// Funding status of a budget, derived from (funded, spent, target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Unfunded,
    PartiallyFunded,
    FullyFunded,
    Overspent,
}

impl BudgetStatus {
    /// Derive the status from the three amounts. Pure; first matching
    /// rule wins:
    /// 1. spent > target        -> Overspent
    /// 2. funded == 0           -> Unfunded
    /// 3. funded < target       -> PartiallyFunded
    /// 4. otherwise             -> FullyFunded
    pub fn derive(funded: Money, spent: Money, target: Money) -> Self {
        if spent > target {
            Self::Overspent
        } else if funded.is_zero() {
            Self::Unfunded
        } else if funded < target {
            Self::PartiallyFunded
        } else {
            Self::FullyFunded
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unfunded => "unfunded",
            Self::PartiallyFunded => "partially funded",
            Self::FullyFunded => "fully funded",
            Self::Overspent => "overspent",
        };
        write!(f, "{}", s)
    }
}

/// How long a budget runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Yearly,
    Custom,
}

/// One unit of funding drawn from one income into one budget.
///
/// Immutable once created. Negative amounts record a transfer out
/// during reallocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub id: AllocationId,
    pub income_id: IncomeId,
    pub amount: Money,
    pub date: DateTime<Utc>,
}

impl BudgetAllocation {
    /// Create a new allocation record dated now
    pub fn new(income_id: IncomeId, amount: Money) -> Self {
        Self {
            id: AllocationId::new(),
            income_id,
            amount,
            date: Utc::now(),
        }
    }
}

/// A budget with a funding target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// Expense category this budget covers; None means a general budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Target amount
    pub amount: Money,

    /// Total earmarked via allocations; always equals the record sum
    #[serde(default)]
    pub funded_amount: Money,

    /// Total of linked expenses; may exceed both target and funded
    #[serde(default)]
    pub spent_amount: Money,

    #[serde(default = "default_status")]
    pub status: BudgetStatus,

    /// Full funding provenance of `funded_amount`
    #[serde(default)]
    pub allocations: Vec<BudgetAllocation>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub period: BudgetPeriod,

    pub start_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

fn default_status() -> BudgetStatus {
    BudgetStatus::Unfunded
}

fn default_true() -> bool {
    true
}

impl Budget {
    /// Create a new, unfunded budget
    pub fn new(name: impl Into<String>, amount: Money, start_date: NaiveDate) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            category: None,
            amount,
            funded_amount: Money::zero(),
            spent_amount: Money::zero(),
            status: BudgetStatus::Unfunded,
            allocations: Vec::new(),
            is_active: true,
            period: BudgetPeriod::Monthly,
            start_date,
            end_date: None,
        }
    }

    /// Funded money not yet spent
    pub fn available(&self) -> Money {
        self.funded_amount - self.spent_amount
    }

    /// Funding still needed to reach the target (never negative)
    pub fn needed(&self) -> Money {
        let need = self.amount - self.funded_amount;
        if need.is_negative() {
            Money::zero()
        } else {
            need
        }
    }

    /// Check whether the budget is below its funding target
    pub fn is_underfunded(&self) -> bool {
        self.funded_amount < self.amount
    }

    /// Rederive and store the status. Must be called after any change
    /// to funded, spent, or the target.
    pub fn refresh_status(&mut self) {
        self.status = BudgetStatus::derive(self.funded_amount, self.spent_amount, self.amount);
    }

    /// Net funded contribution per income, summing all records
    /// (transfers out are negative records). Zero nets are dropped.
    pub fn contributions_by_income(&self) -> BTreeMap<IncomeId, Money> {
        let mut by_income: BTreeMap<IncomeId, Money> = BTreeMap::new();
        for alloc in &self.allocations {
            *by_income.entry(alloc.income_id).or_default() += alloc.amount;
        }
        by_income.retain(|_, amount| !amount.is_zero());
        by_income
    }

    /// Check the funded-equals-record-sum invariant
    pub fn funding_reconciles(&self) -> bool {
        let record_sum: Money = self.allocations.iter().map(|a| a.amount).sum();
        record_sum == self.funded_amount
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveTarget);
        }
        if !self.funding_reconciles() {
            return Err(BudgetValidationError::FundingMismatch);
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NonPositiveTarget,
    FundingMismatch,
}

impl std::fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Budget target must be positive"),
            Self::FundingMismatch => {
                write!(f, "Funded amount does not match the allocation records")
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
