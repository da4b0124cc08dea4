use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Subscription, SubscriptionStatus};

/// A recent price change worth surfacing to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceChangeAlert {
    pub subscription_id: Uuid,
    pub name: String,
    pub changed_on: NaiveDate,
    pub previous_cost: f64,
    pub new_cost: f64,
    pub change: f64,
    /// `None` when the previous cost was zero.
    pub percent_change: Option<f64>,
}

impl PriceChangeAlert {
    pub fn is_increase(&self) -> bool {
        self.change > 0.0
    }
}

/// Latest price change of each non-cancelled subscription made within
/// `lookback_days` up to and including `today`, newest first.
///
/// A lookback reaching past the start of the calendar covers all history.
pub fn price_change_alerts(
    subscriptions: &[Subscription],
    today: NaiveDate,
    lookback_days: i64,
) -> Vec<PriceChangeAlert> {
    let earliest = today
        .checked_sub_days(window(lookback_days))
        .unwrap_or(NaiveDate::MIN);
    let mut alerts: Vec<PriceChangeAlert> = subscriptions
        .iter()
        .filter(|sub| sub.status != SubscriptionStatus::Cancelled)
        .filter_map(|sub| {
            let latest = sub.latest_price_change()?;
            if latest.changed_on < earliest || latest.changed_on > today {
                return None;
            }
            let change = latest.new_cost - latest.previous_cost;
            let percent_change = (latest.previous_cost.abs() > f64::EPSILON)
                .then(|| change / latest.previous_cost * 100.0);
            Some(PriceChangeAlert {
                subscription_id: sub.id,
                name: sub.name.clone(),
                changed_on: latest.changed_on,
                previous_cost: latest.previous_cost,
                new_cost: latest.new_cost,
                change,
                percent_change,
            })
        })
        .collect();
    alerts.sort_by(|a, b| b.changed_on.cmp(&a.changed_on));
    alerts
}

/// Negative windows collapse to `today` alone.
fn window(days: i64) -> Days {
    Days::new(u64::try_from(days).unwrap_or(0))
}

/// An active subscription charging soon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub subscription_id: Uuid,
    pub name: String,
    pub due: NaiveDate,
    pub cost: f64,
    pub days_until: i64,
}

/// Active subscriptions due in `[today, today + within_days]`, soonest first.
pub fn upcoming_renewals(
    subscriptions: &[Subscription],
    today: NaiveDate,
    within_days: i64,
) -> Vec<UpcomingRenewal> {
    let horizon = today
        .checked_add_days(window(within_days))
        .unwrap_or(NaiveDate::MAX);
    let mut renewals: Vec<UpcomingRenewal> = subscriptions
        .iter()
        .filter(|sub| sub.is_active())
        .filter_map(|sub| {
            let due = sub.next_payment_date.date()?;
            (today..=horizon).contains(&due).then(|| UpcomingRenewal {
                subscription_id: sub.id,
                name: sub.name.clone(),
                due,
                cost: sub.cost,
                days_until: (due - today).num_days(),
            })
        })
        .collect();
    renewals.sort_by_key(|renewal| renewal.due);
    renewals
}
