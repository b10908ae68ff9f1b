//! Category service
//!
//! Thin layer over the category lists. Removing a name never rewrites
//! the entities that carry it; they keep the stale name.

use crate::error::{FintrackError, FintrackResult};
use crate::models::CategoryKind;
use crate::storage::Storage;

/// Service for category list management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List the category names for a kind
    pub fn list(&self, kind: CategoryKind) -> FintrackResult<Vec<String>> {
        Ok(self.storage.categories.get_all()?.list(kind).to_vec())
    }

    /// Add a category name. Duplicates are rejected.
    pub fn add(&self, kind: CategoryKind, name: &str) -> FintrackResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FintrackError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if !self.storage.categories.add(kind, name)? {
            return Err(FintrackError::Validation(format!(
                "Category '{}' already exists",
                name
            )));
        }
        self.storage.categories.save()?;
        Ok(())
    }

    /// Remove a category name
    pub fn remove(&self, kind: CategoryKind, name: &str) -> FintrackResult<()> {
        if !self.storage.categories.remove(kind, name)? {
            return Err(FintrackError::NotFound {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        self.storage.categories.save()?;
        Ok(())
    }
}
