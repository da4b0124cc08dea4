pub mod alert_service;
pub mod pay_period_service;
pub mod renewal_service;
pub mod statistics_service;

pub use alert_service::{
    price_change_alerts, upcoming_renewals, PriceChangeAlert, UpcomingRenewal,
};
pub use pay_period_service::{
    calculate_pay_period_requirements, summarize_requirements, PayPeriodService,
    RequirementSummary,
};
pub use renewal_service::{roll_forward, roll_forward_all};
pub use statistics_service::{
    category_breakdown, get_subscription_statistics, spend_summary, CategorySpend, SpendSummary,
    SubscriptionStatistics,
};

use crate::errors::SubTrackerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] SubTrackerError),
    #[error("{0}")]
    Invalid(String),
}
