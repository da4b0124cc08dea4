use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use subtracker_core::{
    calendar::WeekPartitioner,
    core::services::calculate_pay_period_requirements,
    domain::{BillingCycle, Subscription},
    storage::{load_subscriptions_from_path, save_subscriptions_to_path},
};
use tempfile::tempdir;

fn build_subscriptions(count: usize) -> Vec<Subscription> {
    let start = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    (0..count)
        .map(|idx| {
            Subscription::new(
                format!("Service {idx}"),
                5.0 + (idx % 40) as f64,
                BillingCycle::Monthly,
                start + Duration::days((idx % 120) as i64),
            )
        })
        .collect()
}

fn bench_requirements(c: &mut Criterion) {
    let partitioner = WeekPartitioner::default();
    let today = NaiveDate::from_ymd_opt(2025, 8, 9).unwrap();
    let subs = build_subscriptions(black_box(1_000));

    c.bench_function("requirements_16w_1k", |b| {
        b.iter(|| {
            let weeks =
                calculate_pay_period_requirements(&partitioner, &subs, 16, today).expect("plan");
            black_box(weeks);
        })
    });

    c.bench_function("upcoming_weeks_52", |b| {
        b.iter(|| black_box(partitioner.upcoming_weeks(52, today).count()))
    });
}

fn bench_store_io(c: &mut Criterion) {
    let subs = build_subscriptions(black_box(1_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("subscriptions.json");
    save_subscriptions_to_path(&subs, &file_path).expect("seed");

    c.bench_function("subscriptions_load_1k", |b| {
        b.iter(|| {
            let loaded = load_subscriptions_from_path(&file_path).expect("load");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_requirements, bench_store_io);
criterion_main!(benches);
