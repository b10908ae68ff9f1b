//! Subscription CLI commands

use clap::Subcommand;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{BillingCycle, Subscription, SubscriptionId};
use crate::services::subscription::{
    CreateSubscriptionInput, SubscriptionService, UpdateSubscriptionInput,
};
use crate::storage::Storage;

use super::{display_currency, format_amount, parse_amount, parse_date};

/// Subscription subcommands
#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// Add a subscription
    Add {
        /// Subscription name
        name: String,
        /// Amount charged each cycle (e.g., "15.99")
        amount: String,
        /// Billing cycle (one-time, daily, weekly, monthly, yearly)
        #[arg(short = 'y', long, default_value = "monthly")]
        cycle: String,
        /// Category
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Start date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start_date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Website
        #[arg(short, long)]
        website: Option<String>,
    },
    /// List all subscriptions
    List {
        /// Only show subscriptions due within N days
        #[arg(short, long)]
        due: Option<u64>,
    },
    /// Edit a subscription
    Edit {
        /// Subscription name or ID
        subscription: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New billing cycle
        #[arg(short = 'y', long)]
        cycle: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New next payment date (YYYY-MM-DD)
        #[arg(long)]
        next_payment: Option<String>,
        /// Activate or deactivate (true/false)
        #[arg(long)]
        active: Option<bool>,
    },
    /// Record a payment, advancing the next due date
    Paid {
        /// Subscription name or ID
        subscription: String,
    },
    /// Delete a subscription
    Delete {
        /// Subscription name or ID
        subscription: String,
    },
}

fn parse_cycle(s: &str) -> FintrackResult<BillingCycle> {
    match s.to_ascii_lowercase().as_str() {
        "one-time" | "onetime" => Ok(BillingCycle::OneTime),
        "daily" => Ok(BillingCycle::Daily),
        "weekly" => Ok(BillingCycle::Weekly),
        "monthly" => Ok(BillingCycle::Monthly),
        "yearly" => Ok(BillingCycle::Yearly),
        other => Err(FintrackError::Validation(format!(
            "Invalid billing cycle '{}': expected one-time, daily, weekly, monthly or yearly",
            other
        ))),
    }
}

/// Resolve a subscription argument: a full UUID, the short display
/// form, or a case-insensitive name
fn resolve_subscription(
    service: &SubscriptionService,
    ident: &str,
) -> FintrackResult<Subscription> {
    if let Ok(id) = ident.parse::<SubscriptionId>() {
        if let Ok(subscription) = service.get(id) {
            return Ok(subscription);
        }
    }

    let mut matches: Vec<Subscription> = service
        .list()?
        .into_iter()
        .filter(|s| s.name.eq_ignore_ascii_case(ident) || s.id.to_string().starts_with(ident))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(FintrackError::subscription_not_found(ident)),
        _ => Err(FintrackError::Validation(format!(
            "Subscription '{}' is ambiguous, use the ID",
            ident
        ))),
    }
}

/// Handle a subscription command
pub fn handle_subscription_command(
    storage: &Storage,
    cmd: SubscriptionCommands,
) -> FintrackResult<()> {
    let service = SubscriptionService::new(storage);
    let currency = display_currency(storage);

    match cmd {
        SubscriptionCommands::Add {
            name,
            amount,
            cycle,
            category,
            start_date,
            description,
            website,
        } => {
            let subscription = service.create(CreateSubscriptionInput {
                name,
                amount: parse_amount(&amount)?,
                category,
                start_date: start_date.as_deref().map(parse_date).transpose()?,
                billing_cycle: parse_cycle(&cycle)?,
                description,
                website,
            })?;

            println!("Added subscription: {}", subscription.name);
            println!(
                "  Amount: {} {:?}",
                format_amount(subscription.amount, currency),
                subscription.billing_cycle
            );
            println!("  Next payment: {}", subscription.next_payment_date);
            println!("  ID: {}", subscription.id);
        }

        SubscriptionCommands::List { due } => {
            let subscriptions = match due {
                Some(days) => service.due_within(days)?,
                None => service.list()?,
            };

            if subscriptions.is_empty() {
                println!("No subscriptions.");
                return Ok(());
            }

            for subscription in &subscriptions {
                let active = if subscription.is_active { "" } else { "  (inactive)" };
                println!(
                    "{}  {:<20}  {:>10}  next {}{}",
                    subscription.id,
                    subscription.name,
                    format_amount(subscription.amount, currency),
                    subscription.next_payment_date,
                    active
                );
            }
            println!();
            println!(
                "Monthly cost of active subscriptions: {}",
                format_amount(service.monthly_cost()?, currency)
            );
        }

        SubscriptionCommands::Edit {
            subscription,
            name,
            amount,
            cycle,
            category,
            next_payment,
            active,
        } => {
            let found = resolve_subscription(&service, &subscription)?;
            let updated = service.update(
                found.id,
                UpdateSubscriptionInput {
                    name,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    category,
                    billing_cycle: cycle.as_deref().map(parse_cycle).transpose()?,
                    next_payment_date: next_payment.as_deref().map(parse_date).transpose()?,
                    description: None,
                    website: None,
                    is_active: active,
                },
            )?;
            println!("Updated subscription: {}", updated.name);
        }

        SubscriptionCommands::Paid { subscription } => {
            let found = resolve_subscription(&service, &subscription)?;
            let paid = service.mark_paid(found.id)?;
            if paid.is_active {
                println!(
                    "Recorded payment for {}. Next payment: {}",
                    paid.name, paid.next_payment_date
                );
            } else {
                println!("Recorded payment for {}. One-time subscription closed.", paid.name);
            }
        }

        SubscriptionCommands::Delete { subscription } => {
            let found = resolve_subscription(&service, &subscription)?;
            service.delete(found.id)?;
            println!("Deleted subscription: {}", found.name);
        }
    }

    Ok(())
}
