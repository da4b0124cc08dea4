mod common;

use std::fs;

use common::{august_subscriptions, date, setup_test_env, temp_dir};
use subtracker_core::{
    calendar::{AnchorSet, WeekAnchor},
    config::Config,
    domain::{BillingCycle, SubscriptionStatus},
    storage::{load_subscriptions_from_path, SubscriptionStore},
};

#[test]
fn store_round_trips_a_subscription_list() {
    let (store, _) = setup_test_env();
    let subs = august_subscriptions();
    store.save(&subs).unwrap();
    assert_eq!(store.load().unwrap(), subs);
}

#[test]
fn missing_store_file_is_empty() {
    let (store, _) = setup_test_env();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn browser_export_loads_with_unreadable_dates_kept() {
    let path = temp_dir().join("export.json");
    fs::write(
        &path,
        r#"[
          {
            "id": "8f9b6a2e-3c1d-4e5f-9a7b-1c2d3e4f5a6b",
            "name": "Video",
            "cost": 15.49,
            "billingCycle": "monthly",
            "nextPaymentDate": "2025-08-15T00:00:00.000Z",
            "status": "active",
            "category": "Entertainment"
          },
          {
            "id": "1a2b3c4d-5e6f-4a8b-9c0d-1e2f3a4b5c6d",
            "name": "Mystery",
            "cost": 4.0,
            "billingCycle": "variable",
            "nextPaymentDate": "someday",
            "status": "watchlist"
          }
        ]"#,
    )
    .unwrap();

    let subs = load_subscriptions_from_path(&path).unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].payment_date().unwrap(), date(2025, 8, 15));
    assert_eq!(subs[1].billing_cycle, BillingCycle::Variable);
    assert_eq!(subs[1].status, SubscriptionStatus::Watchlist);
    assert_eq!(subs[1].next_payment_date.raw(), "someday");
    assert!(subs[1].payment_date().is_err());
    assert_eq!(subs[1].category, "");
}

#[test]
fn config_defaults_when_absent_and_round_trips() {
    let (_, manager) = setup_test_env();
    assert_eq!(manager.load().unwrap(), Config::default());

    let mut config = Config::default();
    config.currency = "EUR".into();
    config.week_anchors = AnchorSet::new(vec![
        WeekAnchor::new(date(2025, 8, 7), 1).unwrap(),
        WeekAnchor::new(date(2026, 1, 15), 1).unwrap(),
    ])
    .unwrap();
    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn config_with_a_non_thursday_anchor_is_rejected() {
    let (_, manager) = setup_test_env();
    fs::write(
        manager.path(),
        r#"{ "week_anchors": [ { "date": "2025-08-08", "weekNumber": 1 } ] }"#,
    )
    .unwrap();
    assert!(manager.load().is_err());
}
