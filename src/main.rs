use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack_cli::cli::{
    handle_budget_command, handle_category_command, handle_data_command, handle_expense_command,
    handle_income_command, handle_subscription_command,
};
use fintrack_cli::config::FintrackPaths;
use fintrack_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Track incomes, expenses, subscriptions and budgets from the terminal",
    long_about = "fintrack is a local-first personal finance tracker. Record incomes \
                  and expenses, define budgets, and fund them from received income: \
                  every allocation is drawn from the oldest available income first, \
                  and each budget derives a funding status from what it holds, what \
                  it spent and what it targets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income management commands
    #[command(subcommand, alias = "inc")]
    Income(fintrack_cli::cli::IncomeCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(fintrack_cli::cli::ExpenseCommands),

    /// Subscription management commands
    #[command(subcommand, alias = "sub")]
    Subscription(fintrack_cli::cli::SubscriptionCommands),

    /// Budget and funding commands
    #[command(subcommand, alias = "bud")]
    Budget(fintrack_cli::cli::BudgetCommands),

    /// Category list commands
    #[command(subcommand, alias = "cat")]
    Category(fintrack_cli::cli::CategoryCommands),

    /// Export and import the full dataset
    #[command(subcommand)]
    Data(fintrack_cli::cli::DataCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Income(cmd)) => handle_income_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Subscription(cmd)) => handle_subscription_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Data(cmd)) => handle_data_command(&storage, cmd)?,
        Some(Commands::Config) => {
            let settings = storage.settings.get()?;
            println!("fintrack configuration");
            println!("  Data directory: {}", storage.paths().data_dir().display());
            println!("  Currency: {}", settings.currency);
        }
        None => {
            println!("fintrack - personal finance tracking from the terminal");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
