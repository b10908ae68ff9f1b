//! Category CLI commands

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::CategoryKind;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List category names
    List {
        /// Which kind to list (income, expense, subscription); all when omitted
        kind: Option<String>,
    },
    /// Add a category name
    Add {
        /// Which kind (income, expense, subscription)
        kind: String,
        /// Category name
        name: String,
    },
    /// Remove a category name (existing records keep the old name)
    Remove {
        /// Which kind (income, expense, subscription)
        kind: String,
        /// Category name
        name: String,
    },
}

fn parse_kind(s: &str) -> FintrackResult<CategoryKind> {
    match s.to_ascii_lowercase().as_str() {
        "income" => Ok(CategoryKind::Income),
        "expense" => Ok(CategoryKind::Expense),
        "subscription" => Ok(CategoryKind::Subscription),
        other => Err(FintrackError::Validation(format!(
            "Invalid category kind '{}': expected income, expense or subscription",
            other
        ))),
    }
}

fn print_kind(service: &CategoryService, kind: CategoryKind, label: &str) -> FintrackResult<()> {
    println!("{}:", label);
    for name in service.list(kind)? {
        println!("  {}", name);
    }
    Ok(())
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FintrackResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => match kind {
            Some(kind) => {
                let kind = parse_kind(&kind)?;
                for name in service.list(kind)? {
                    println!("{}", name);
                }
            }
            None => {
                print_kind(&service, CategoryKind::Income, "Income")?;
                print_kind(&service, CategoryKind::Expense, "Expense")?;
                print_kind(&service, CategoryKind::Subscription, "Subscription")?;
            }
        },

        CategoryCommands::Add { kind, name } => {
            service.add(parse_kind(&kind)?, &name)?;
            println!("Added category: {}", name);
        }

        CategoryCommands::Remove { kind, name } => {
            service.remove(parse_kind(&kind)?, &name)?;
            println!("Removed category: {}", name);
        }
    }

    Ok(())
}
