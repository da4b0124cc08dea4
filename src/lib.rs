#![doc(test(attr(deny(warnings))))]

//! SubTracker Core turns a list of tracked subscriptions into weekly cash
//! requirements aligned to a Thursday payday, along with the dashboard
//! statistics and alerts built on the same records.
//!
//! ```
//! use chrono::NaiveDate;
//! use subtracker_core::{
//!     calendar::WeekPartitioner,
//!     core::services::calculate_pay_period_requirements,
//!     domain::{BillingCycle, Subscription},
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2025, 8, 9).unwrap();
//! let due = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
//! let subs = vec![Subscription::new("Video", 15.0, BillingCycle::Monthly, due)];
//!
//! let weeks =
//!     calculate_pay_period_requirements(&WeekPartitioner::default(), &subs, 4, today).unwrap();
//! assert_eq!(weeks.len(), 4);
//! assert_eq!(weeks[1].required_amount, 15.0);
//! ```

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SubTracker Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
