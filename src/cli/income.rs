//! Income CLI commands

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Income, IncomeId, Money};
use crate::services::income::{CreateIncomeInput, IncomeService, UpdateIncomeInput};
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{display_currency, format_amount, parse_amount, parse_date};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record a new income
    Add {
        /// Amount received (e.g., "2500.00")
        amount: String,
        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Where the money came from
        #[arg(short, long)]
        source: Option<String>,
        /// Income category
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List all incomes
    List {
        /// Only show incomes with unallocated balance
        #[arg(short, long)]
        available: bool,
    },
    /// Show income details
    Show {
        /// Income ID (full or short form)
        income: String,
    },
    /// Edit an income
    Edit {
        /// Income ID (full or short form)
        income: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New source
        #[arg(short, long)]
        source: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an income, unwinding its budget allocations
    Delete {
        /// Income ID (full or short form)
        income: String,
    },
}

/// Resolve an income argument: a full UUID or the short display form
fn resolve_income(service: &IncomeService, ident: &str) -> FintrackResult<Income> {
    if let Ok(id) = ident.parse::<IncomeId>() {
        if let Ok(income) = service.get(id) {
            return Ok(income);
        }
    }

    let mut matches: Vec<Income> = service
        .list()?
        .into_iter()
        .filter(|i| i.id.to_string().starts_with(ident))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(FintrackError::income_not_found(ident)),
        _ => Err(FintrackError::Validation(format!(
            "Income '{}' is ambiguous, use a longer ID",
            ident
        ))),
    }
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> FintrackResult<()> {
    let service = IncomeService::new(storage);
    let currency = display_currency(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            date,
            source,
            category,
            description,
        } => {
            let income = service.create(CreateIncomeInput {
                amount: parse_amount(&amount)?,
                date: date.as_deref().map(parse_date).transpose()?,
                source,
                category,
                description,
            })?;

            println!("Recorded income: {}", format_amount(income.amount, currency));
            println!("  Date: {}", income.date);
            println!("  Category: {}", income.category);
            if let Some(source) = &income.source {
                println!("  Source: {}", source);
            }
            println!("  ID: {}", income.id);
        }

        IncomeCommands::List { available } => {
            let incomes = if available {
                BudgetService::new(storage).available_incomes()?
            } else {
                service.list()?
            };

            if incomes.is_empty() {
                println!("No incomes recorded.");
                return Ok(());
            }

            let mut total = Money::zero();
            let mut unallocated = Money::zero();
            for income in &incomes {
                let source = income.source.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  {:>12}  available {:>12}  {}",
                    income.id,
                    income.date,
                    format_amount(income.amount, currency),
                    format_amount(income.available(), currency),
                    source
                );
                total += income.amount;
                unallocated += income.available();
            }
            println!();
            println!(
                "Total: {}  Unallocated: {}",
                format_amount(total, currency),
                format_amount(unallocated, currency)
            );
        }

        IncomeCommands::Show { income } => {
            let income = resolve_income(&service, &income)?;
            println!("Income {}", income.id);
            println!("  Amount: {}", format_amount(income.amount, currency));
            println!(
                "  Allocated: {}",
                format_amount(income.allocated_amount, currency)
            );
            println!(
                "  Available: {}",
                format_amount(income.available(), currency)
            );
            println!("  Date: {}", income.date);
            println!("  Category: {}", income.category);
            if let Some(source) = &income.source {
                println!("  Source: {}", source);
            }
            if !income.description.is_empty() {
                println!("  Description: {}", income.description);
            }
        }

        IncomeCommands::Edit {
            income,
            amount,
            date,
            source,
            category,
            description,
        } => {
            let found = resolve_income(&service, &income)?;
            let updated = service.update(
                found.id,
                UpdateIncomeInput {
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    date: date.as_deref().map(parse_date).transpose()?,
                    source,
                    category,
                    description,
                },
            )?;
            println!(
                "Updated income {}: {}",
                updated.id,
                format_amount(updated.amount, currency)
            );
        }

        IncomeCommands::Delete { income } => {
            let found = resolve_income(&service, &income)?;
            service.delete(found.id)?;
            println!(
                "Deleted income {} ({})",
                found.id,
                format_amount(found.amount, currency)
            );
            if found.allocated_amount.is_positive() {
                println!(
                    "  Reversed {} of budget funding.",
                    format_amount(found.allocated_amount, currency)
                );
            }
        }
    }

    Ok(())
}
