//! Budget repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets ordered by start date (earliest first, ID as
    /// tie-break)
    pub fn get_all(&self) -> Result<Vec<Budget>, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), FintrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget. Returns whether it existed.
    pub fn delete(&self, id: BudgetId) -> Result<bool, FintrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(budgets.remove(&id).is_some())
    }

    /// Replace the whole set (bulk import)
    pub fn replace_all(&self, new_budgets: Vec<Budget>) -> Result<(), FintrackError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        budgets.clear();
        for budget in new_budgets {
            budgets.insert(budget.id, budget);
        }
        Ok(())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, FintrackError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    fn date(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, 1).unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let budget = Budget::new("Groceries", Money::from_cents(50000), date(1));
        let id = budget.id;
        repo.upsert(budget).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Groceries");
    }

    #[test]
    fn test_get_all_sorted_by_start_date() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Budget::new("March", Money::from_cents(100), date(3)))
            .unwrap();
        repo.upsert(Budget::new("January", Money::from_cents(100), date(1)))
            .unwrap();
        repo.upsert(Budget::new("February", Money::from_cents(100), date(2)))
            .unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["January", "February", "March"]);
    }

    #[test]
    fn test_save_and_reload_preserves_allocations() {
        use crate::models::{BudgetAllocation, IncomeId};

        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut budget = Budget::new("Rent", Money::from_cents(100000), date(1));
        budget
            .allocations
            .push(BudgetAllocation::new(IncomeId::new(), Money::from_cents(40000)));
        budget.funded_amount = Money::from_cents(40000);
        budget.refresh_status();
        let id = budget.id;

        repo.upsert(budget).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();

        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.allocations.len(), 1);
        assert_eq!(loaded.funded_amount.cents(), 40000);
        assert!(loaded.funding_reconciles());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let budget = Budget::new("Gone", Money::from_cents(100), date(1));
        let id = budget.id;
        repo.upsert(budget).unwrap();

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
