//! Domain types representing tracked subscriptions.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::time_interval::{TimeInterval, TimeUnit};
use crate::errors::SubTrackerError;

/// A recurring charge the user is tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub cost: f64,
    pub billing_cycle: BillingCycle,
    pub next_payment_date: PaymentDate,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_history: Vec<PriceChange>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        billing_cycle: BillingCycle,
        next_payment_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cost,
            billing_cycle,
            next_payment_date: PaymentDate::from(next_payment_date),
            status: SubscriptionStatus::Active,
            category: "Other".into(),
            price_history: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Parsed next payment date; errors when the stored value is unreadable.
    pub fn payment_date(&self) -> Result<NaiveDate, SubTrackerError> {
        self.next_payment_date.parse()
    }

    /// Cost normalised to a per-month figure for dashboard totals.
    pub fn monthly_cost(&self) -> f64 {
        self.billing_cycle.monthly_equivalent(self.cost)
    }

    /// Updates the cost and appends the change to the price history.
    pub fn record_price_change(&mut self, new_cost: f64, changed_on: NaiveDate) {
        self.price_history.push(PriceChange {
            changed_on,
            previous_cost: self.cost,
            new_cost,
        });
        self.cost = new_cost;
    }

    /// Most recent price change by date.
    pub fn latest_price_change(&self) -> Option<&PriceChange> {
        self.price_history.iter().max_by_key(|change| change.changed_on)
    }
}

/// Recurrence interval at which a subscription charges its cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
    Variable,
}

impl BillingCycle {
    pub fn monthly_equivalent(&self, cost: f64) -> f64 {
        match self {
            BillingCycle::Monthly | BillingCycle::Variable => cost,
            BillingCycle::Quarterly => cost / 3.0,
            BillingCycle::Yearly => cost / 12.0,
        }
    }

    /// Fixed recurrence step; variable billing has none.
    pub fn interval(&self) -> Option<TimeInterval> {
        match self {
            BillingCycle::Monthly => Some(TimeInterval::new(1, TimeUnit::Month)),
            BillingCycle::Quarterly => Some(TimeInterval::new(3, TimeUnit::Month)),
            BillingCycle::Yearly => Some(TimeInterval::new(1, TimeUnit::Year)),
            BillingCycle::Variable => None,
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
            BillingCycle::Variable => "Variable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Watchlist,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Cancelled => "Cancelled",
            SubscriptionStatus::Watchlist => "Watchlist",
        };
        f.write_str(label)
    }
}

/// A recorded change of a subscription's price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub changed_on: NaiveDate,
    pub previous_cost: f64,
    pub new_cost: f64,
}

/// Next-payment date as entered by the user.
///
/// Records come from hand-edited or imported data, so the raw text is kept
/// alongside the parsed value. An unreadable date does not prevent the record
/// from loading; consumers decide whether to skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PaymentDate {
    raw: String,
    parsed: Option<NaiveDate>,
}

impl PaymentDate {
    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn parse(&self) -> Result<NaiveDate, SubTrackerError> {
        self.parsed
            .ok_or_else(|| SubTrackerError::MalformedDate(self.raw.clone()))
    }
}

impl From<NaiveDate> for PaymentDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            raw: date.format("%Y-%m-%d").to_string(),
            parsed: Some(date),
        }
    }
}

impl From<String> for PaymentDate {
    fn from(raw: String) -> Self {
        let parsed = parse_calendar_date(&raw);
        Self { raw, parsed }
    }
}

impl From<&str> for PaymentDate {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<PaymentDate> for String {
    fn from(value: PaymentDate) -> Self {
        value.raw
    }
}

impl fmt::Display for PaymentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Accepts plain ISO dates as well as full timestamps; the time of day is dropped.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
