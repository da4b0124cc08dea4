use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Subscription, SubscriptionStatus};

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Subscription counts partitioned by status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionStatistics {
    pub total: usize,
    pub active: usize,
    pub cancelled: usize,
    pub watchlist: usize,
}

pub fn get_subscription_statistics(subscriptions: &[Subscription]) -> SubscriptionStatistics {
    subscriptions.iter().fold(
        SubscriptionStatistics::default(),
        |mut stats, sub| {
            stats.total += 1;
            match sub.status {
                SubscriptionStatus::Active => stats.active += 1,
                SubscriptionStatus::Cancelled => stats.cancelled += 1,
                SubscriptionStatus::Watchlist => stats.watchlist += 1,
            }
            stats
        },
    )
}

/// Recurring spend of the active subscriptions at different granularities.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SpendSummary {
    pub monthly: f64,
    pub weekly: f64,
    pub yearly: f64,
}

pub fn spend_summary(subscriptions: &[Subscription]) -> SpendSummary {
    let monthly: f64 = subscriptions
        .iter()
        .filter(|sub| sub.is_active())
        .map(Subscription::monthly_cost)
        .sum();
    let yearly = monthly * MONTHS_PER_YEAR;
    SpendSummary {
        monthly,
        weekly: yearly / WEEKS_PER_YEAR,
        yearly,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub monthly: f64,
    pub count: usize,
}

/// Monthly-equivalent spend per category, most expensive first.
pub fn category_breakdown(subscriptions: &[Subscription]) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for sub in subscriptions.iter().filter(|sub| sub.is_active()) {
        let entry = totals.entry(sub.category.as_str()).or_insert((0.0, 0));
        entry.0 += sub.monthly_cost();
        entry.1 += 1;
    }
    let mut breakdown: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, (monthly, count))| CategorySpend {
            category: category.to_string(),
            monthly,
            count,
        })
        .collect();
    // Stable sort keeps the alphabetical order of the map for equal spend.
    breakdown.sort_by(|a, b| b.monthly.total_cmp(&a.monthly));
    breakdown
}
