//! Subscription model
//!
//! Recurring payments tracked separately from one-off expenses. The
//! next payment date advances by the billing cycle when a payment is
//! recorded.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::SubscriptionId;
use super::money::Money;

/// How often a subscription bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BillingCycle {
    OneTime,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// The payment date following `from`, or None for one-time billing
    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::OneTime => None,
            Self::Daily => from.checked_add_days(Days::new(1)),
            Self::Weekly => from.checked_add_days(Days::new(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
            Self::Yearly => from.checked_add_months(Months::new(12)),
        }
    }
}

/// A recurring subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,

    pub name: String,

    /// Amount charged each cycle
    pub amount: Money,

    /// Subscription category name (weak reference into the category set)
    #[serde(default)]
    pub category: String,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub billing_cycle: BillingCycle,

    pub next_payment_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Subscription {
    /// Create a new active subscription billing from `start_date`
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
        billing_cycle: BillingCycle,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            name: name.into(),
            amount,
            category: String::new(),
            start_date,
            billing_cycle,
            next_payment_date: start_date,
            description: None,
            website: None,
            is_active: true,
        }
    }

    /// Record a payment: advance the next payment date by one cycle.
    /// A one-time subscription deactivates instead.
    pub fn record_payment(&mut self) {
        match self.billing_cycle.next_date(self.next_payment_date) {
            Some(next) => self.next_payment_date = next,
            None => self.is_active = false,
        }
    }

    /// Check whether a payment falls due on or before `cutoff`
    pub fn is_due_by(&self, cutoff: NaiveDate) -> bool {
        self.is_active && self.next_payment_date <= cutoff
    }

    /// Validate the subscription
    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }
        if !self.amount.is_positive() {
            return Err(SubscriptionValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Validation errors for subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionValidationError {
    EmptyName,
    NonPositiveAmount,
}

impl std::fmt::Display for SubscriptionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subscription name cannot be empty"),
            Self::NonPositiveAmount => write!(f, "Subscription amount must be positive"),
        }
    }
}

impl std::error::Error for SubscriptionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_billing_cycle_advancement() {
        let jan31 = date(2024, 1, 31);
        assert_eq!(BillingCycle::Daily.next_date(jan31), Some(date(2024, 2, 1)));
        assert_eq!(BillingCycle::Weekly.next_date(jan31), Some(date(2024, 2, 7)));
        // chrono clamps month-end overflow
        assert_eq!(BillingCycle::Monthly.next_date(jan31), Some(date(2024, 2, 29)));
        assert_eq!(BillingCycle::Yearly.next_date(jan31), Some(date(2025, 1, 31)));
        assert_eq!(BillingCycle::OneTime.next_date(jan31), None);
    }

    #[test]
    fn test_record_payment_advances() {
        let mut sub = Subscription::new(
            "Streaming",
            Money::from_cents(1599),
            date(2024, 1, 15),
            BillingCycle::Monthly,
        );
        sub.record_payment();
        assert_eq!(sub.next_payment_date, date(2024, 2, 15));
        assert!(sub.is_active);
    }

    #[test]
    fn test_one_time_deactivates_on_payment() {
        let mut sub = Subscription::new(
            "Domain",
            Money::from_cents(1200),
            date(2024, 1, 15),
            BillingCycle::OneTime,
        );
        sub.record_payment();
        assert!(!sub.is_active);
    }

    #[test]
    fn test_is_due_by() {
        let mut sub = Subscription::new(
            "Gym",
            Money::from_cents(3000),
            date(2024, 3, 1),
            BillingCycle::Monthly,
        );
        assert!(sub.is_due_by(date(2024, 3, 1)));
        assert!(!sub.is_due_by(date(2024, 2, 28)));

        sub.is_active = false;
        assert!(!sub.is_due_by(date(2024, 3, 1)));
    }

    #[test]
    fn test_serialization_shape() {
        let sub = Subscription::new(
            "Streaming",
            Money::from_cents(1599),
            date(2024, 1, 15),
            BillingCycle::Monthly,
        );
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["billingCycle"], serde_json::json!("monthly"));
        assert_eq!(json["nextPaymentDate"], serde_json::json!("2024-01-15"));
        assert_eq!(json["isActive"], serde_json::json!(true));
    }
}
