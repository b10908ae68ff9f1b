//! Storage layer for fintrack
//!
//! JSON file storage with atomic writes. One repository per entity
//! set, each holding its data in memory behind a lock; the engine
//! mutates in memory and saves explicitly after each operation.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod incomes;
pub mod settings;
pub mod subscriptions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use incomes::IncomeRepository;
pub use settings::SettingsRepository;
pub use subscriptions::SubscriptionRepository;

use crate::config::paths::FintrackPaths;
use crate::error::FintrackError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FintrackPaths,
    pub incomes: IncomeRepository,
    pub expenses: ExpenseRepository,
    pub subscriptions: SubscriptionRepository,
    pub budgets: BudgetRepository,
    pub categories: CategoryRepository,
    pub settings: SettingsRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FintrackPaths) -> Result<Self, FintrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            incomes: IncomeRepository::new(paths.incomes_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            subscriptions: SubscriptionRepository::new(paths.subscriptions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            settings: SettingsRepository::new(paths.settings_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FintrackError> {
        self.incomes.load()?;
        self.expenses.load()?;
        self.subscriptions.load()?;
        self.budgets.load()?;
        self.categories.load()?;
        self.settings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FintrackError> {
        self.incomes.save()?;
        self.expenses.save()?;
        self.subscriptions.save()?;
        self.budgets.save()?;
        self.categories.save()?;
        self.settings.save()?;
        Ok(())
    }
}
