//! Income service
//!
//! CRUD over incomes plus the deletion cascade: removing an income
//! also removes every allocation record it backs and reduces the
//! funded amount of the affected budgets.

use chrono::{NaiveDate, Utc};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Income, IncomeId, Money};
use crate::storage::Storage;

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new income
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    pub amount: Money,
    /// Defaults to today when not given
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub category: String,
    pub description: String,
}

/// Input for updating an income. The allocated amount is engine-owned
/// and cannot be set here.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncomeInput {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl<'a> IncomeService<'a> {
    /// Create a new income service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new income. It always starts fully unallocated.
    pub fn create(&self, input: CreateIncomeInput) -> FintrackResult<Income> {
        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut income = Income::new(input.amount, date);
        income.source = input.source;
        income.category = input.category;
        income.description = input.description;

        income
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        Ok(income)
    }

    /// Get an income by ID
    pub fn get(&self, id: IncomeId) -> FintrackResult<Income> {
        self.storage
            .incomes
            .get(id)?
            .ok_or_else(|| FintrackError::income_not_found(id.to_string()))
    }

    /// List all incomes, oldest first
    pub fn list(&self) -> FintrackResult<Vec<Income>> {
        self.storage.incomes.get_all()
    }

    /// Update an income. Lowering the amount below what is already
    /// allocated is rejected; free up the money first by deleting or
    /// shrinking the budgets it funds.
    pub fn update(&self, id: IncomeId, input: UpdateIncomeInput) -> FintrackResult<Income> {
        let mut income = self.get(id)?;

        if let Some(amount) = input.amount {
            income.amount = amount;
        }
        if let Some(date) = input.date {
            income.date = date;
        }
        if let Some(source) = input.source {
            income.source = Some(source);
        }
        if let Some(category) = input.category {
            income.category = category;
        }
        if let Some(description) = input.description {
            income.description = description;
        }

        income
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.incomes.upsert(income.clone())?;
        self.storage.incomes.save()?;

        Ok(income)
    }

    /// Delete an income, cascading into the budgets it funds: every
    /// allocation record backed by it is removed and each affected
    /// budget's funded amount drops by the income's net contribution.
    pub fn delete(&self, id: IncomeId) -> FintrackResult<()> {
        // NotFound surfaces before anything is touched
        self.get(id)?;

        let mut budgets_touched = false;
        for mut budget in self.storage.budgets.get_all()? {
            if budget.allocations.iter().all(|a| a.income_id != id) {
                continue;
            }

            let net: Money = budget
                .allocations
                .iter()
                .filter(|a| a.income_id == id)
                .map(|a| a.amount)
                .sum();
            budget.allocations.retain(|a| a.income_id != id);
            budget.funded_amount -= net;
            budget.refresh_status();
            self.storage.budgets.upsert(budget)?;
            budgets_touched = true;
        }

        self.storage.incomes.delete(id)?;
        self.storage.incomes.save()?;
        if budgets_touched {
            self.storage.budgets.save()?;
        }

        Ok(())
    }
}
