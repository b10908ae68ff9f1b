//! Core data models for fintrack
//!
//! Plain records for incomes, expenses, subscriptions, budgets, and
//! allocation provenance, plus the money and ID newtypes they share.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod settings;
pub mod subscription;

pub use budget::{Budget, BudgetAllocation, BudgetPeriod, BudgetStatus};
pub use category::{CategoryKind, CategorySet};
pub use expense::Expense;
pub use ids::{AllocationId, BudgetId, ExpenseId, IncomeId, SubscriptionId};
pub use income::Income;
pub use money::Money;
pub use settings::{Currency, Settings};
pub use subscription::{BillingCycle, Subscription};
