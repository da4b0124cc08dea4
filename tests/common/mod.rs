#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use subtracker_core::{
    config::ConfigManager,
    domain::{BillingCycle, Subscription, SubscriptionStatus},
    storage::JsonSubscriptionStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated store and config manager backed by a unique directory.
pub fn setup_test_env() -> (JsonSubscriptionStore, ConfigManager) {
    let base = temp_dir();
    let store = JsonSubscriptionStore::new(base.join("subscriptions.json"));
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (store, config_manager)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn monthly(name: &str, cost: f64, due: NaiveDate) -> Subscription {
    Subscription::new(name, cost, BillingCycle::Monthly, due)
}

/// Mixed-status list due across August 2025.
pub fn august_subscriptions() -> Vec<Subscription> {
    vec![
        monthly("Video", 15.49, date(2025, 8, 15)).with_category("Entertainment"),
        monthly("Music", 9.99, date(2025, 8, 15)).with_category("Entertainment"),
        monthly("Cloud storage", 2.99, date(2025, 8, 28)).with_category("Utilities"),
        monthly("Gym", 40.0, date(2025, 8, 20)).with_status(SubscriptionStatus::Cancelled),
        Subscription::new("News", 120.0, BillingCycle::Yearly, date(2025, 8, 21))
            .with_status(SubscriptionStatus::Watchlist),
    ]
}
