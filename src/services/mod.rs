//! Service layer
//!
//! Business logic on top of the storage layer: validation, the funding
//! engine, spend tracking, and the cross-entity cascades that keep the
//! income and budget sides of the ledger consistent.

pub mod budget;
pub mod category;
pub mod expense;
pub mod import;
pub mod income;
pub mod subscription;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::ExpenseService;
pub use import::ImportService;
pub use income::IncomeService;
pub use subscription::SubscriptionService;
