//! Subscription service
//!
//! CRUD over recurring subscriptions plus the due-date queries the CLI
//! surfaces.

use chrono::{Days, NaiveDate, Utc};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{BillingCycle, Money, Subscription, SubscriptionId};
use crate::storage::Storage;

/// Service for subscription management
pub struct SubscriptionService<'a> {
    storage: &'a Storage,
}

/// Input for adding a subscription
#[derive(Debug, Clone)]
pub struct CreateSubscriptionInput {
    pub name: String,
    pub amount: Money,
    pub category: String,
    /// Defaults to today when not given
    pub start_date: Option<NaiveDate>,
    pub billing_cycle: BillingCycle,
    pub description: Option<String>,
    pub website: Option<String>,
}

/// Input for updating a subscription
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionInput {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub next_payment_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub is_active: Option<bool>,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new subscription service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a subscription. The first payment falls due on the start
    /// date.
    pub fn create(&self, input: CreateSubscriptionInput) -> FintrackResult<Subscription> {
        let start_date = input.start_date.unwrap_or_else(|| Utc::now().date_naive());
        let mut subscription =
            Subscription::new(input.name, input.amount, start_date, input.billing_cycle);
        subscription.category = input.category;
        subscription.description = input.description;
        subscription.website = input.website;

        subscription
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;

        Ok(subscription)
    }

    /// Get a subscription by ID
    pub fn get(&self, id: SubscriptionId) -> FintrackResult<Subscription> {
        self.storage
            .subscriptions
            .get(id)?
            .ok_or_else(|| FintrackError::subscription_not_found(id.to_string()))
    }

    /// List all subscriptions, next payment first
    pub fn list(&self) -> FintrackResult<Vec<Subscription>> {
        self.storage.subscriptions.get_all()
    }

    /// Update a subscription
    pub fn update(
        &self,
        id: SubscriptionId,
        input: UpdateSubscriptionInput,
    ) -> FintrackResult<Subscription> {
        let mut subscription = self.get(id)?;

        if let Some(name) = input.name {
            subscription.name = name;
        }
        if let Some(amount) = input.amount {
            subscription.amount = amount;
        }
        if let Some(category) = input.category {
            subscription.category = category;
        }
        if let Some(billing_cycle) = input.billing_cycle {
            subscription.billing_cycle = billing_cycle;
        }
        if let Some(next_payment_date) = input.next_payment_date {
            subscription.next_payment_date = next_payment_date;
        }
        if let Some(description) = input.description {
            subscription.description = Some(description);
        }
        if let Some(website) = input.website {
            subscription.website = Some(website);
        }
        if let Some(is_active) = input.is_active {
            subscription.is_active = is_active;
        }

        subscription
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;

        Ok(subscription)
    }

    /// Delete a subscription
    pub fn delete(&self, id: SubscriptionId) -> FintrackResult<()> {
        self.get(id)?;
        self.storage.subscriptions.delete(id)?;
        self.storage.subscriptions.save()?;
        Ok(())
    }

    /// Active subscriptions due within the next `days` days
    pub fn due_within(&self, days: u64) -> FintrackResult<Vec<Subscription>> {
        let today = Utc::now().date_naive();
        let cutoff = today
            .checked_add_days(Days::new(days))
            .ok_or_else(|| FintrackError::Validation("Day span out of range".into()))?;

        Ok(self
            .list()?
            .into_iter()
            .filter(|s| s.is_due_by(cutoff))
            .collect())
    }

    /// Record a payment, advancing the next due date by one billing
    /// cycle. One-time subscriptions deactivate instead.
    pub fn mark_paid(&self, id: SubscriptionId) -> FintrackResult<Subscription> {
        let mut subscription = self.get(id)?;
        subscription.record_payment();
        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;
        Ok(subscription)
    }

    /// Total cost per month of active subscriptions, normalizing each
    /// billing cycle to its monthly share
    pub fn monthly_cost(&self) -> FintrackResult<Money> {
        let cents: i64 = self
            .list()?
            .iter()
            .filter(|s| s.is_active)
            .map(|s| match s.billing_cycle {
                BillingCycle::OneTime => 0,
                BillingCycle::Daily => s.amount.cents() * 30,
                BillingCycle::Weekly => s.amount.cents() * 52 / 12,
                BillingCycle::Monthly => s.amount.cents(),
                BillingCycle::Yearly => s.amount.cents() / 12,
            })
            .sum();
        Ok(Money::from_cents(cents))
    }
}
