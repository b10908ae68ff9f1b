//! Category repository for JSON storage
//!
//! Unlike the entity repositories this holds a single document: the
//! three category name lists.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FintrackError;
use crate::models::{CategoryKind, CategorySet};

use super::file_io::{read_json, write_json_atomic};

/// Repository for the category set
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<CategorySet>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(CategorySet::default()),
        }
    }

    /// Load the category set from disk; defaults are used if the file
    /// does not exist yet
    pub fn load(&self) -> Result<(), FintrackError> {
        // Missing file means first run: keep the defaults
        if !self.path.exists() {
            return Ok(());
        }

        let file_data: CategorySet = read_json(&self.path)?;
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = file_data;
        Ok(())
    }

    /// Save the category set to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*categories)
    }

    /// Get a copy of the whole set
    pub fn get_all(&self) -> Result<CategorySet, FintrackError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(categories.clone())
    }

    /// Add a category name. Returns whether it was new.
    pub fn add(&self, kind: CategoryKind, name: &str) -> Result<bool, FintrackError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(categories.add(kind, name))
    }

    /// Remove a category name. Returns whether it was present.
    pub fn remove(&self, kind: CategoryKind, name: &str) -> Result<bool, FintrackError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(categories.remove(kind, name))
    }

    /// Replace the whole set (bulk import)
    pub fn replace_all(&self, new_set: CategorySet) -> Result<(), FintrackError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = new_set;
        Ok(())
    }
}
