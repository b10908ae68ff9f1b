//! JSON interchange
//!
//! Exports the complete dataset to a single JSON document and parses
//! the same shape back for import. Amounts serialize as decimal
//! numbers and dates as ISO-8601 strings, so a document written here
//! is readable by hand and by other tools.

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, CategorySet, Expense, Income, Money, Settings, Subscription};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// Full dataset interchange document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExport {
    /// When the document was written
    pub export_date: DateTime<Utc>,

    #[serde(default)]
    pub incomes: Vec<Income>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub subscriptions: Vec<Subscription>,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    /// Missing sections fall back to the default category lists
    #[serde(default)]
    pub categories: CategorySet,

    #[serde(default)]
    pub settings: Settings,
}

impl FullExport {
    /// Snapshot the complete dataset from storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        Ok(Self {
            export_date: Utc::now(),
            incomes: storage.incomes.get_all()?,
            expenses: storage.expenses.get_all()?,
            subscriptions: storage.subscriptions.get_all()?,
            budgets: storage.budgets.get_all()?,
            categories: storage.categories.get_all()?,
            settings: storage.settings.get()?,
        })
    }

    /// Validate the document as one unit: per-entity invariants,
    /// referential integrity across sections, and funding consistency.
    pub fn validate(&self) -> Result<(), String> {
        for income in &self.incomes {
            income
                .validate()
                .map_err(|e| format!("Income {}: {}", income.id, e))?;
        }
        for expense in &self.expenses {
            expense
                .validate()
                .map_err(|e| format!("Expense {}: {}", expense.id, e))?;
        }
        for subscription in &self.subscriptions {
            subscription
                .validate()
                .map_err(|e| format!("Subscription {}: {}", subscription.id, e))?;
        }
        for budget in &self.budgets {
            budget
                .validate()
                .map_err(|e| format!("Budget {}: {}", budget.id, e))?;
        }

        let income_ids: HashSet<_> = self.incomes.iter().map(|i| i.id).collect();
        let budget_ids: HashSet<_> = self.budgets.iter().map(|b| b.id).collect();

        // Every allocation record must point at a known income
        for budget in &self.budgets {
            for record in &budget.allocations {
                if !income_ids.contains(&record.income_id) {
                    return Err(format!(
                        "Budget {} has an allocation from unknown income {}",
                        budget.id, record.income_id
                    ));
                }
            }
        }

        // Every budget link must point at a known budget
        for expense in &self.expenses {
            if let Some(budget_id) = expense.budget_id {
                if !budget_ids.contains(&budget_id) {
                    return Err(format!(
                        "Expense {} references unknown budget {}",
                        expense.id, budget_id
                    ));
                }
            }
        }

        // Conservation: each income's allocated amount must equal the
        // net of the allocation records that draw on it
        for income in &self.incomes {
            let drawn: Money = self
                .budgets
                .iter()
                .flat_map(|b| &b.allocations)
                .filter(|a| a.income_id == income.id)
                .map(|a| a.amount)
                .sum();
            if drawn != income.allocated_amount {
                return Err(format!(
                    "Income {} claims {} allocated but budgets draw {}",
                    income.id, income.allocated_amount, drawn
                ));
            }
        }

        Ok(())
    }
}

/// Export the full dataset to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export document
pub fn import_from_json(json_str: &str) -> FintrackResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| FintrackError::Import(e.to_string()))?;

    export.validate().map_err(FintrackError::Import)?;

    Ok(export)
}
