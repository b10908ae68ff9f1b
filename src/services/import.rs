//! Import service
//!
//! All-or-nothing restore from an interchange document. The document
//! is parsed and validated as one unit before anything in storage is
//! touched; a single bad record rejects the whole import and the
//! existing dataset stays exactly as it was.

use crate::error::{FintrackError, FintrackResult};
use crate::export::{import_from_json, import_from_yaml, FullExport};
use crate::storage::Storage;

/// Counts of what an import brought in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub incomes: usize,
    pub expenses: usize,
    pub subscriptions: usize,
    pub budgets: usize,
}

/// Service for bulk data import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a JSON interchange document, replacing the dataset
    pub fn import_json(&self, json_str: &str) -> FintrackResult<ImportSummary> {
        let export = import_from_json(json_str)?;
        self.apply(export)
    }

    /// Import a YAML interchange document, replacing the dataset
    pub fn import_yaml(&self, yaml_str: &str) -> FintrackResult<ImportSummary> {
        let export = import_from_yaml(yaml_str)?;
        self.apply(export)
    }

    /// Replace the entire dataset with a validated document.
    ///
    /// Statuses are rederived and spent totals recomputed from the
    /// imported expenses rather than trusted, so the single-writer
    /// invariants hold for data produced elsewhere.
    pub fn apply(&self, export: FullExport) -> FintrackResult<ImportSummary> {
        export.validate().map_err(FintrackError::Import)?;

        let FullExport {
            incomes,
            expenses,
            subscriptions,
            mut budgets,
            categories,
            settings,
            ..
        } = export;

        for budget in &mut budgets {
            budget.spent_amount = expenses
                .iter()
                .filter(|e| e.budget_id == Some(budget.id))
                .map(|e| e.amount)
                .sum();
            budget.refresh_status();
        }

        let summary = ImportSummary {
            incomes: incomes.len(),
            expenses: expenses.len(),
            subscriptions: subscriptions.len(),
            budgets: budgets.len(),
        };

        self.storage.incomes.replace_all(incomes)?;
        self.storage.expenses.replace_all(expenses)?;
        self.storage.subscriptions.replace_all(subscriptions)?;
        self.storage.budgets.replace_all(budgets)?;
        self.storage.categories.replace_all(categories)?;
        self.storage.settings.replace(settings)?;
        self.storage.save_all()?;

        Ok(summary)
    }
}
