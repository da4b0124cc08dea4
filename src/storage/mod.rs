pub mod json_backend;

use crate::{domain::Subscription, errors::Result};

/// Abstraction over the record store that owns the subscription list.
pub trait SubscriptionStore {
    fn load(&self) -> Result<Vec<Subscription>>;
    fn save(&self, subscriptions: &[Subscription]) -> Result<()>;
}

pub use json_backend::{load_subscriptions_from_path, save_subscriptions_to_path, JsonSubscriptionStore};
