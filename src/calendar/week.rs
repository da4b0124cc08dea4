use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::Subscription;

/// Day-of-week index of Thursday with Sunday = 0.
const THURSDAY: u32 = 4;
pub(crate) const DAYS_PER_WEEK: i64 = 7;

/// Thursday opening the Thursday-to-Wednesday week that contains `date`.
/// Saturates at the first representable date.
pub fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday();
    let since_thursday = (weekday + 7 - THURSDAY) % 7;
    date.checked_sub_days(Days::new(u64::from(since_thursday)))
        .unwrap_or(NaiveDate::MIN)
}

/// Wednesday closing the week opened by `thursday`. Saturates at the last
/// representable date.
pub fn wednesday_of_week(thursday: NaiveDate) -> NaiveDate {
    thursday
        .checked_add_days(Days::new((DAYS_PER_WEEK - 1) as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// "Month Year" label, e.g. `August 2025`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// One Thursday-to-Wednesday pay period and the subscriptions due inside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_number: u32,
    pub month_label: String,
    pub is_current_week: bool,
    pub required_amount: f64,
    pub subscriptions: Vec<Subscription>,
}

impl WeekBucket {
    /// Builds an empty bucket for the week opened by `thursday`.
    pub fn new(thursday: NaiveDate, week_number: u32, today: NaiveDate) -> Self {
        Self {
            start_date: thursday,
            end_date: wednesday_of_week(thursday),
            week_number,
            month_label: month_label(thursday),
            is_current_week: thursday == thursday_of_week(today),
            required_amount: 0.0,
            subscriptions: Vec::new(),
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn label(&self) -> String {
        format!("{} - Week {}", self.month_label, self.week_number)
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub(crate) fn assign(&mut self, subscriptions: Vec<Subscription>) {
        self.required_amount = subscriptions.iter().map(|sub| sub.cost).sum();
        self.subscriptions = subscriptions;
    }
}
