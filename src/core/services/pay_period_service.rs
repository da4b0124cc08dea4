//! Weekly cash requirements aligned to the Thursday payday.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    alert_service::{self, PriceChangeAlert, UpcomingRenewal},
    ServiceError, ServiceResult,
};
use crate::calendar::{WeekBucket, WeekPartitioner};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::domain::Subscription;
use crate::errors::SubTrackerError;

/// Buckets active subscriptions into the next `weeks` pay periods by their
/// next payment date and totals each bucket.
///
/// Every requested week is returned, empty or not, in ascending order.
/// Payments beyond the horizon are left out, as are records whose payment
/// date cannot be read. A zero horizon is a caller error.
pub fn calculate_pay_period_requirements(
    partitioner: &WeekPartitioner,
    subscriptions: &[Subscription],
    weeks: u32,
    today: NaiveDate,
) -> Result<Vec<WeekBucket>, SubTrackerError> {
    if weeks == 0 {
        return Err(SubTrackerError::InvalidHorizon(weeks));
    }

    let dated: Vec<(NaiveDate, &Subscription)> = subscriptions
        .iter()
        .filter(|sub| sub.is_active())
        .filter_map(|sub| match sub.payment_date() {
            Ok(date) => Some((date, sub)),
            Err(err) => {
                warn!(subscription = %sub.id, name = %sub.name, error = %err, "skipping subscription");
                None
            }
        })
        .collect();

    let buckets: Vec<WeekBucket> = partitioner
        .upcoming_weeks(weeks as usize, today)
        .map(|mut bucket| {
            let due = dated
                .iter()
                .filter(|(date, _)| bucket.contains(*date))
                .map(|(_, sub)| (*sub).clone())
                .collect();
            bucket.assign(due);
            bucket
        })
        .collect();

    debug!(
        weeks,
        considered = dated.len(),
        assigned = buckets.iter().map(|b| b.subscriptions.len()).sum::<usize>(),
        "calculated pay period requirements"
    );
    Ok(buckets)
}

/// Totals across a planned horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSummary {
    pub total_required: f64,
    pub average_weekly: f64,
    /// Index of the most expensive week; the earliest wins ties. `None` when
    /// nothing is due.
    pub highest_week: Option<usize>,
    pub empty_weeks: usize,
}

pub fn summarize_requirements(buckets: &[WeekBucket]) -> RequirementSummary {
    let total_required: f64 = buckets.iter().map(|bucket| bucket.required_amount).sum();
    let average_weekly = if buckets.is_empty() {
        0.0
    } else {
        total_required / buckets.len() as f64
    };
    let highest_week = buckets
        .iter()
        .enumerate()
        .filter(|(_, bucket)| bucket.required_amount > 0.0)
        .fold(None::<(usize, f64)>, |best, (index, bucket)| match best {
            Some((_, amount)) if amount >= bucket.required_amount => best,
            _ => Some((index, bucket.required_amount)),
        })
        .map(|(index, _)| index);

    RequirementSummary {
        total_required,
        average_weekly,
        highest_week,
        empty_weeks: buckets.iter().filter(|bucket| bucket.is_empty()).count(),
    }
}

/// Planning facade that resolves "today" from a [`Clock`].
pub struct PayPeriodService<C: Clock = SystemClock> {
    partitioner: WeekPartitioner,
    clock: C,
}

impl PayPeriodService<SystemClock> {
    pub fn new(partitioner: WeekPartitioner) -> Self {
        Self::with_clock(partitioner, SystemClock)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.partitioner())
    }
}

impl<C: Clock> PayPeriodService<C> {
    pub fn with_clock(partitioner: WeekPartitioner, clock: C) -> Self {
        Self { partitioner, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn partitioner(&self) -> &WeekPartitioner {
        &self.partitioner
    }

    pub fn current_week(&self) -> WeekBucket {
        self.partitioner.current_week(self.today())
    }

    pub fn upcoming_weeks(&self, count: usize) -> Vec<WeekBucket> {
        self.partitioner.upcoming_weeks(count, self.today()).collect()
    }

    pub fn weeks_for_month(&self, year: i32, month: u32) -> Vec<WeekBucket> {
        self.partitioner.weeks_for_month(year, month, self.today())
    }

    pub fn calculate_pay_period_requirements(
        &self,
        subscriptions: &[Subscription],
        weeks: u32,
    ) -> ServiceResult<Vec<WeekBucket>> {
        calculate_pay_period_requirements(&self.partitioner, subscriptions, weeks, self.today())
            .map_err(ServiceError::from)
    }

    pub fn price_change_alerts(
        &self,
        subscriptions: &[Subscription],
        lookback_days: i64,
    ) -> ServiceResult<Vec<PriceChangeAlert>> {
        if lookback_days < 0 {
            return Err(ServiceError::Invalid(format!(
                "lookback must not be negative (got {lookback_days} days)"
            )));
        }
        Ok(alert_service::price_change_alerts(
            subscriptions,
            self.today(),
            lookback_days,
        ))
    }

    pub fn upcoming_renewals(
        &self,
        subscriptions: &[Subscription],
        within_days: i64,
    ) -> ServiceResult<Vec<UpcomingRenewal>> {
        if within_days < 0 {
            return Err(ServiceError::Invalid(format!(
                "renewal window must not be negative (got {within_days} days)"
            )));
        }
        Ok(alert_service::upcoming_renewals(
            subscriptions,
            self.today(),
            within_days,
        ))
    }
}
