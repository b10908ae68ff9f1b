//! Expense service
//!
//! CRUD over expenses. Every expense may be linked to a budget; the
//! linked budget's spent amount is kept in sync here, on create,
//! update (including re-linking) and delete, and its status is
//! rederived after every change.

use chrono::{NaiveDate, Utc};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{BudgetId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense tracking
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    /// Defaults to today when not given
    pub date: Option<NaiveDate>,
    pub category: String,
    pub description: String,
    pub vendor: Option<String>,
    pub budget_id: Option<BudgetId>,
}

/// Input for updating an expense. `budget_id` distinguishes "leave the
/// link alone" (`None`) from "unlink" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub budget_id: Option<Option<BudgetId>>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense. Linking to a budget adds the amount to that
    /// budget's spent total.
    pub fn create(&self, input: CreateExpenseInput) -> FintrackResult<Expense> {
        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut expense = Expense::new(input.amount, date);
        expense.category = input.category;
        expense.description = input.description;
        expense.vendor = input.vendor;
        expense.budget_id = input.budget_id;

        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        if let Some(budget_id) = expense.budget_id {
            self.apply_to_budget(budget_id, expense.amount)?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        if expense.budget_id.is_some() {
            self.storage.budgets.save()?;
        }

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> FintrackResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| FintrackError::expense_not_found(id.to_string()))
    }

    /// List all expenses, oldest first
    pub fn list(&self) -> FintrackResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// List the expenses linked to a budget, oldest first
    pub fn list_for_budget(&self, budget_id: BudgetId) -> FintrackResult<Vec<Expense>> {
        self.storage.expenses.get_by_budget(budget_id)
    }

    /// Update an expense. The old amount is reversed off the old
    /// budget link and the new amount applied to the new one, so
    /// amount changes and re-linking both keep spent totals in sync.
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> FintrackResult<Expense> {
        let old = self.get(id)?;
        let mut expense = old.clone();

        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(category) = input.category {
            expense.category = category;
        }
        if let Some(description) = input.description {
            expense.description = description;
        }
        if let Some(vendor) = input.vendor {
            expense.vendor = Some(vendor);
        }
        if let Some(budget_id) = input.budget_id {
            expense.budget_id = budget_id;
        }

        expense
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        // linking to a budget that does not exist fails before any
        // spent totals move
        if let Some(budget_id) = expense.budget_id {
            if self.storage.budgets.get(budget_id)?.is_none() {
                return Err(FintrackError::budget_not_found(budget_id.to_string()));
            }
        }

        if let Some(budget_id) = old.budget_id {
            self.reverse_from_budget(budget_id, old.amount)?;
        }
        if let Some(budget_id) = expense.budget_id {
            self.apply_to_budget(budget_id, expense.amount)?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        if old.budget_id.is_some() || expense.budget_id.is_some() {
            self.storage.budgets.save()?;
        }

        Ok(expense)
    }

    /// Delete an expense, subtracting its amount from the linked
    /// budget's spent total.
    pub fn delete(&self, id: ExpenseId) -> FintrackResult<()> {
        let expense = self.get(id)?;

        if let Some(budget_id) = expense.budget_id {
            self.reverse_from_budget(budget_id, expense.amount)?;
        }

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;
        if expense.budget_id.is_some() {
            self.storage.budgets.save()?;
        }

        Ok(())
    }

    fn apply_to_budget(&self, budget_id: BudgetId, amount: Money) -> FintrackResult<()> {
        let mut budget = self
            .storage
            .budgets
            .get(budget_id)?
            .ok_or_else(|| FintrackError::budget_not_found(budget_id.to_string()))?;
        budget.spent_amount += amount;
        budget.refresh_status();
        self.storage.budgets.upsert(budget)?;
        Ok(())
    }

    /// Reversal tolerates a missing budget: the expense's link may
    /// point at a budget deleted since.
    fn reverse_from_budget(&self, budget_id: BudgetId, amount: Money) -> FintrackResult<()> {
        if let Some(mut budget) = self.storage.budgets.get(budget_id)? {
            budget.spent_amount -= amount;
            budget.refresh_status();
            self.storage.budgets.upsert(budget)?;
        }
        Ok(())
    }
}
