//! Income repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{Income, IncomeId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable income document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    #[serde(default)]
    incomes: Vec<Income>,
}

/// Repository for income persistence
pub struct IncomeRepository {
    path: PathBuf,
    incomes: RwLock<HashMap<IncomeId, Income>>,
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            incomes: RwLock::new(HashMap::new()),
        }
    }

    /// Load incomes from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut incomes = self
            .incomes
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        incomes.clear();
        for income in file_data.incomes {
            incomes.insert(income.id, income);
        }

        Ok(())
    }

    /// Save incomes to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let file_data = IncomeData {
            incomes: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an income by ID
    pub fn get(&self, id: IncomeId) -> Result<Option<Income>, FintrackError> {
        let incomes = self
            .incomes
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(incomes.get(&id).cloned())
    }

    /// Get all incomes in date order (oldest first, ID as tie-break)
    pub fn get_all(&self) -> Result<Vec<Income>, FintrackError> {
        let incomes = self
            .incomes
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = incomes.values().cloned().collect();
        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    /// Insert or update an income
    pub fn upsert(&self, income: Income) -> Result<(), FintrackError> {
        let mut incomes = self
            .incomes
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        incomes.insert(income.id, income);
        Ok(())
    }

    /// Delete an income. Returns whether it existed.
    pub fn delete(&self, id: IncomeId) -> Result<bool, FintrackError> {
        let mut incomes = self
            .incomes
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(incomes.remove(&id).is_some())
    }

    /// Replace the whole set (bulk import)
    pub fn replace_all(&self, new_incomes: Vec<Income>) -> Result<(), FintrackError> {
        let mut incomes = self
            .incomes
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        incomes.clear();
        for income in new_incomes {
            incomes.insert(income.id, income);
        }
        Ok(())
    }

    /// Count incomes
    pub fn count(&self) -> Result<usize, FintrackError> {
        let incomes = self
            .incomes
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(incomes.len())
    }
}
