//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Each domain
//! gets its own subcommand enum and handler function.

pub mod budget;
pub mod category;
pub mod data;
pub mod expense;
pub mod income;
pub mod subscription;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use data::{handle_data_command, DataCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use subscription::{handle_subscription_command, SubscriptionCommands};

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Currency, Money};
use crate::storage::Storage;

/// Parse a YYYY-MM-DD date argument
fn parse_date(s: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", s))
    })
}

/// Parse an amount argument like "1250.50" or "$1250.50"
fn parse_amount(s: &str) -> FintrackResult<Money> {
    Money::parse(s).map_err(|e| {
        FintrackError::Validation(format!(
            "Invalid amount '{}': use a format like '1250.50'. {}",
            s, e
        ))
    })
}

/// Format an amount with the configured currency symbol
fn format_amount(amount: Money, currency: Currency) -> String {
    if amount.is_negative() {
        format!("-{}{}", currency.symbol(), -amount)
    } else {
        format!("{}{}", currency.symbol(), amount)
    }
}

/// The configured display currency, falling back to the default when
/// settings cannot be read
fn display_currency(storage: &Storage) -> Currency {
    storage
        .settings
        .get()
        .map(|s| s.currency)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("15/03/2024").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(
            format_amount(Money::from_cents(1050), Currency::Usd),
            "$10.50"
        );
        assert_eq!(
            format_amount(Money::from_cents(-1050), Currency::Zar),
            "-R10.50"
        );
    }
}
