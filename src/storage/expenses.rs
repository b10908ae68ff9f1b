//! Expense repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{BudgetId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default)]
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            expenses: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expenses.clear();
        for expense in file_data.expenses {
            expenses.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let file_data = ExpenseData {
            expenses: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, FintrackError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(expenses.get(&id).cloned())
    }

    /// Get all expenses in date order (oldest first, ID as tie-break)
    pub fn get_all(&self) -> Result<Vec<Expense>, FintrackError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = expenses.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    /// Get every expense linked to a budget
    pub fn get_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Expense>, FintrackError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|e| e.budget_id == Some(budget_id))
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), FintrackError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        expenses.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense. Returns whether it existed.
    pub fn delete(&self, id: ExpenseId) -> Result<bool, FintrackError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(expenses.remove(&id).is_some())
    }

    /// Replace the whole set (bulk import)
    pub fn replace_all(&self, new_expenses: Vec<Expense>) -> Result<(), FintrackError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        expenses.clear();
        for expense in new_expenses {
            expenses.insert(expense.id, expense);
        }
        Ok(())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, FintrackError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(expenses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let expense = Expense::new(Money::from_cents(4500), date(10));
        let id = expense.id;
        repo.upsert(expense).unwrap();
        assert_eq!(repo.get(id).unwrap().unwrap().amount.cents(), 4500);

        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_get_by_budget() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let budget_id = BudgetId::new();
        let mut linked = Expense::new(Money::from_cents(100), date(1));
        linked.budget_id = Some(budget_id);
        let unlinked = Expense::new(Money::from_cents(200), date(2));

        repo.upsert(linked).unwrap();
        repo.upsert(unlinked).unwrap();

        let by_budget = repo.get_by_budget(budget_id).unwrap();
        assert_eq!(by_budget.len(), 1);
        assert_eq!(by_budget[0].amount.cents(), 100);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Expense::new(Money::from_cents(999), date(5)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
    }
}
