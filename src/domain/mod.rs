//! Subscription records and the value types they are built from.

pub mod subscription;
pub mod time_interval;

pub use subscription::{
    BillingCycle, PaymentDate, PriceChange, Subscription, SubscriptionStatus,
};
pub use time_interval::{TimeInterval, TimeUnit};
