//! Expense CLI commands

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::services::expense::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::budget::resolve_budget;
use super::{display_currency, format_amount, parse_amount, parse_date};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "45.99")
        amount: String,
        /// Expense category
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Date spent (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Vendor
        #[arg(short, long)]
        vendor: Option<String>,
        /// Budget to spend from (name or ID)
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// List expenses
    List {
        /// Only show expenses for one budget (name or ID)
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (full or short form)
        expense: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New vendor
        #[arg(short, long)]
        vendor: Option<String>,
        /// Link to a budget (name or ID)
        #[arg(short, long, conflicts_with = "unlink")]
        budget: Option<String>,
        /// Unlink from its budget
        #[arg(long)]
        unlink: bool,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        expense: String,
    },
}

/// Resolve an expense argument: a full UUID or the short display form
fn resolve_expense(service: &ExpenseService, ident: &str) -> FintrackResult<Expense> {
    if let Ok(id) = ident.parse::<ExpenseId>() {
        if let Ok(expense) = service.get(id) {
            return Ok(expense);
        }
    }

    let mut matches: Vec<Expense> = service
        .list()?
        .into_iter()
        .filter(|e| e.id.to_string().starts_with(ident))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(FintrackError::expense_not_found(ident)),
        _ => Err(FintrackError::Validation(format!(
            "Expense '{}' is ambiguous, use a longer ID",
            ident
        ))),
    }
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> FintrackResult<()> {
    let service = ExpenseService::new(storage);
    let budgets = BudgetService::new(storage);
    let currency = display_currency(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
            vendor,
            budget,
        } => {
            let budget_id = budget
                .as_deref()
                .map(|b| resolve_budget(&budgets, b).map(|found| found.id))
                .transpose()?;

            let expense = service.create(CreateExpenseInput {
                amount: parse_amount(&amount)?,
                date: date.as_deref().map(parse_date).transpose()?,
                category,
                description,
                vendor,
                budget_id,
            })?;

            println!(
                "Recorded expense: {}",
                format_amount(expense.amount, currency)
            );
            println!("  Date: {}", expense.date);
            println!("  Category: {}", expense.category);
            if let Some(budget_id) = expense.budget_id {
                let budget = budgets.get(budget_id)?;
                println!("  Budget: {} [{}]", budget.name, budget.status);
            }
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { budget } => {
            let expenses = match budget.as_deref() {
                Some(b) => {
                    let found = resolve_budget(&budgets, b)?;
                    service.list_for_budget(found.id)?
                }
                None => service.list()?,
            };

            if expenses.is_empty() {
                println!("No expenses recorded.");
                return Ok(());
            }

            let mut total = Money::zero();
            for expense in &expenses {
                let vendor = expense.vendor.as_deref().unwrap_or("-");
                let linked = match expense.budget_id {
                    Some(id) => budgets.get(id).map(|b| b.name).unwrap_or_else(|_| "?".into()),
                    None => "-".into(),
                };
                println!(
                    "{}  {}  {:>12}  {:<16}  budget {:<16}  {}",
                    expense.id,
                    expense.date,
                    format_amount(expense.amount, currency),
                    expense.category,
                    linked,
                    vendor
                );
                total += expense.amount;
            }
            println!();
            println!("Total: {}", format_amount(total, currency));
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            date,
            category,
            description,
            vendor,
            budget,
            unlink,
        } => {
            let found = resolve_expense(&service, &expense)?;

            let budget_id = if unlink {
                Some(None)
            } else {
                budget
                    .as_deref()
                    .map(|b| resolve_budget(&budgets, b).map(|found| Some(found.id)))
                    .transpose()?
            };

            let updated = service.update(
                found.id,
                UpdateExpenseInput {
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    date: date.as_deref().map(parse_date).transpose()?,
                    category,
                    description,
                    vendor,
                    budget_id,
                },
            )?;
            println!(
                "Updated expense {}: {}",
                updated.id,
                format_amount(updated.amount, currency)
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = resolve_expense(&service, &expense)?;
            service.delete(found.id)?;
            println!(
                "Deleted expense {} ({})",
                found.id,
                format_amount(found.amount, currency)
            );
        }
    }

    Ok(())
}
