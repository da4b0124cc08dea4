use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::SubscriptionStore;
use crate::{
    domain::Subscription,
    errors::Result,
    utils::{ensure_dir, staging_path, write_atomic},
};

/// Subscription list kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonSubscriptionStore {
    path: PathBuf,
}

impl JsonSubscriptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubscriptionStore for JsonSubscriptionStore {
    /// A missing file is an empty list.
    fn load(&self) -> Result<Vec<Subscription>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no subscription file yet");
            return Ok(Vec::new());
        }
        load_subscriptions_from_path(&self.path)
    }

    fn save(&self, subscriptions: &[Subscription]) -> Result<()> {
        save_subscriptions_to_path(subscriptions, &self.path)
    }
}

pub fn save_subscriptions_to_path(subscriptions: &[Subscription], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(subscriptions)?;
    let tmp = staging_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    info!(path = %path.display(), count = subscriptions.len(), "saved subscriptions");
    Ok(())
}

pub fn load_subscriptions_from_path(path: &Path) -> Result<Vec<Subscription>> {
    let data = fs::read_to_string(path)?;
    let subscriptions: Vec<Subscription> = serde_json::from_str(&data)?;
    let unreadable = subscriptions
        .iter()
        .filter(|sub| sub.next_payment_date.date().is_none())
        .count();
    if unreadable > 0 {
        tracing::warn!(path = %path.display(), unreadable, "subscriptions with unreadable payment dates");
    }
    debug!(path = %path.display(), count = subscriptions.len(), "loaded subscriptions");
    Ok(subscriptions)
}
