//! Budget CLI commands
//!
//! Covers budget CRUD plus the funding engine: allocate, reallocate
//! and the unallocated-income queries.

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, BudgetId, BudgetPeriod};
use crate::services::budget::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
use crate::storage::Storage;

use super::{display_currency, format_amount, parse_amount, parse_date};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Create {
        /// Budget name
        name: String,
        /// Target amount (e.g., "800.00")
        amount: String,
        /// Budget category
        #[arg(short, long)]
        category: Option<String>,
        /// Budget period (monthly, yearly, custom)
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// Period start date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start_date: Option<String>,
        /// Period end date (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<String>,
    },
    /// List all budgets with funding status
    List {
        /// Only show budgets with money available to spend
        #[arg(short, long)]
        available: bool,
    },
    /// Show budget details including its allocation records
    Show {
        /// Budget name or ID
        budget: String,
    },
    /// Edit a budget
    Edit {
        /// Budget name or ID
        budget: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New target amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New period (monthly, yearly, custom)
        #[arg(short, long)]
        period: Option<String>,
        /// New start date (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<String>,
        /// New end date (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<String>,
        /// Activate or deactivate (true/false)
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a budget, returning its funding to the incomes
    Delete {
        /// Budget name or ID
        budget: String,
    },
    /// Fund a budget from available income (oldest income first)
    Allocate {
        /// Budget name or ID
        budget: String,
        /// Amount to allocate
        amount: String,
    },
    /// Move funded money from one budget to another
    Reallocate {
        /// Source budget name or ID
        from: String,
        /// Target budget name or ID
        to: String,
        /// Amount to move
        amount: String,
    },
    /// Show unallocated income
    Unallocated,
    /// Suggest how to spread unallocated income across underfunded budgets
    Suggest,
}

fn parse_period(s: &str) -> FintrackResult<BudgetPeriod> {
    match s.to_ascii_lowercase().as_str() {
        "monthly" => Ok(BudgetPeriod::Monthly),
        "yearly" => Ok(BudgetPeriod::Yearly),
        "custom" => Ok(BudgetPeriod::Custom),
        other => Err(FintrackError::Validation(format!(
            "Invalid period '{}': expected monthly, yearly or custom",
            other
        ))),
    }
}

/// Resolve a budget argument: a full UUID, the short display form, or
/// a case-insensitive name
pub(crate) fn resolve_budget(service: &BudgetService, ident: &str) -> FintrackResult<Budget> {
    if let Ok(id) = ident.parse::<BudgetId>() {
        if let Ok(budget) = service.get(id) {
            return Ok(budget);
        }
    }

    let mut matches: Vec<Budget> = service
        .list()?
        .into_iter()
        .filter(|b| b.name.eq_ignore_ascii_case(ident) || b.id.to_string().starts_with(ident))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(FintrackError::budget_not_found(ident)),
        _ => Err(FintrackError::Validation(format!(
            "Budget '{}' is ambiguous, use the ID",
            ident
        ))),
    }
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> FintrackResult<()> {
    let service = BudgetService::new(storage);
    let currency = display_currency(storage);

    match cmd {
        BudgetCommands::Create {
            name,
            amount,
            category,
            period,
            start_date,
            end_date,
        } => {
            let start_date = match start_date {
                Some(s) => parse_date(&s)?,
                None => chrono::Utc::now().date_naive(),
            };
            let budget = service.create(CreateBudgetInput {
                name,
                category,
                amount: parse_amount(&amount)?,
                period: parse_period(&period)?,
                start_date,
                end_date: end_date.as_deref().map(parse_date).transpose()?,
            })?;

            println!("Created budget: {}", budget.name);
            println!("  Target: {}", format_amount(budget.amount, currency));
            println!("  Period: {:?} from {}", budget.period, budget.start_date);
            println!("  Status: {}", budget.status);
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List { available } => {
            if available {
                let budgets = service.available_budgets()?;
                if budgets.is_empty() {
                    println!("No budgets with money available to spend.");
                    return Ok(());
                }
                for budget in budgets {
                    println!(
                        "{}  {:<20}  available {:>12}",
                        budget.id,
                        budget.name,
                        format_amount(budget.available_amount, currency)
                    );
                }
                return Ok(());
            }

            let budgets = service.list()?;
            if budgets.is_empty() {
                println!("No budgets defined.");
                return Ok(());
            }
            for budget in budgets {
                println!(
                    "{}  {:<20}  {:>12} funded of {:>12}  spent {:>12}  [{}]",
                    budget.id,
                    budget.name,
                    format_amount(budget.funded_amount, currency),
                    format_amount(budget.amount, currency),
                    format_amount(budget.spent_amount, currency),
                    budget.status
                );
            }
            println!(
                "\nUnallocated income: {}",
                format_amount(service.unallocated_income()?, currency)
            );
        }

        BudgetCommands::Show { budget } => {
            let budget = resolve_budget(&service, &budget)?;
            println!("Budget {} ({})", budget.name, budget.id);
            println!("  Target: {}", format_amount(budget.amount, currency));
            println!("  Funded: {}", format_amount(budget.funded_amount, currency));
            println!("  Spent: {}", format_amount(budget.spent_amount, currency));
            println!(
                "  Available: {}",
                format_amount(budget.available(), currency)
            );
            println!("  Status: {}", budget.status);
            println!("  Period: {:?} from {}", budget.period, budget.start_date);
            if let Some(end) = budget.end_date {
                println!("  Ends: {}", end);
            }
            println!("  Active: {}", if budget.is_active { "yes" } else { "no" });
            if !budget.allocations.is_empty() {
                println!("  Allocations:");
                for record in &budget.allocations {
                    println!(
                        "    {}  {:>12}  from income {}",
                        record.date.date_naive(),
                        format_amount(record.amount, currency),
                        record.income_id
                    );
                }
            }
        }

        BudgetCommands::Edit {
            budget,
            name,
            amount,
            category,
            period,
            start_date,
            end_date,
            active,
        } => {
            let found = resolve_budget(&service, &budget)?;
            let updated = service.update(
                found.id,
                UpdateBudgetInput {
                    name,
                    category,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    period: period.as_deref().map(parse_period).transpose()?,
                    start_date: start_date.as_deref().map(parse_date).transpose()?,
                    end_date: end_date.as_deref().map(parse_date).transpose()?,
                    is_active: active,
                },
            )?;
            println!("Updated budget: {} [{}]", updated.name, updated.status);
        }

        BudgetCommands::Delete { budget } => {
            let found = resolve_budget(&service, &budget)?;
            service.delete(found.id)?;
            println!("Deleted budget: {}", found.name);
            if found.funded_amount.is_positive() {
                println!(
                    "  Returned {} to unallocated income.",
                    format_amount(found.funded_amount, currency)
                );
            }
        }

        BudgetCommands::Allocate { budget, amount } => {
            let found = resolve_budget(&service, &budget)?;
            let outcome = service.allocate(found.id, parse_amount(&amount)?)?;

            if outcome.allocated.is_zero() {
                println!("No unallocated income available; nothing was allocated.");
                return Ok(());
            }
            println!(
                "Allocated {} to {}",
                format_amount(outcome.allocated, currency),
                found.name
            );
            for record in &outcome.allocations {
                println!(
                    "  {} from income {}",
                    format_amount(record.amount, currency),
                    record.income_id
                );
            }
            if outcome.is_partial() {
                println!(
                    "Partially fulfilled: {} of {} requested.",
                    format_amount(outcome.allocated, currency),
                    format_amount(outcome.requested, currency)
                );
            }
        }

        BudgetCommands::Reallocate { from, to, amount } => {
            let source = resolve_budget(&service, &from)?;
            let target = resolve_budget(&service, &to)?;
            let amount = parse_amount(&amount)?;
            service.reallocate(source.id, target.id, amount)?;
            println!(
                "Moved {} from {} to {}",
                format_amount(amount, currency),
                source.name,
                target.name
            );
        }

        BudgetCommands::Unallocated => {
            println!(
                "Unallocated income: {}",
                format_amount(service.unallocated_income()?, currency)
            );
            let incomes = service.available_incomes()?;
            for income in incomes {
                println!(
                    "  {}  {}  available {}",
                    income.id,
                    income.date,
                    format_amount(income.available(), currency)
                );
            }
        }

        BudgetCommands::Suggest => {
            let suggestions = service.suggest_allocations()?;
            if suggestions.is_empty() {
                println!("Nothing to suggest: no unallocated income or no underfunded budgets.");
                return Ok(());
            }
            println!("Suggested allocations (run 'budget allocate' to apply):");
            for suggestion in suggestions {
                let budget = service.get(suggestion.budget_id)?;
                println!(
                    "  {:<20}  {}",
                    budget.name,
                    format_amount(suggestion.suggested_amount, currency)
                );
            }
        }
    }

    Ok(())
}
