use chrono::NaiveDate;
use tracing::info;

use crate::domain::{PaymentDate, Subscription};

/// Moves a past-due next payment date forward by whole billing cycles to the
/// first date on or after `today`. Returns whether the date changed.
///
/// Only active subscriptions with a fixed cycle and a readable date move.
pub fn roll_forward(subscription: &mut Subscription, today: NaiveDate) -> bool {
    if !subscription.is_active() {
        return false;
    }
    let (Some(interval), Some(current)) = (
        subscription.billing_cycle.interval(),
        subscription.next_payment_date.date(),
    ) else {
        return false;
    };
    if current >= today {
        return false;
    }
    let next = interval.first_on_or_after(current, today);
    info!(subscription = %subscription.id, from = %current, to = %next, "rolled payment date forward");
    subscription.next_payment_date = PaymentDate::from(next);
    true
}

/// Applies [`roll_forward`] to every record, returning how many moved.
pub fn roll_forward_all(subscriptions: &mut [Subscription], today: NaiveDate) -> usize {
    subscriptions
        .iter_mut()
        .filter_map(|sub| roll_forward(sub, today).then_some(()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, SubscriptionStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_due_dates_move_by_whole_cycles() {
        let today = date(2025, 8, 20);
        let mut subs = vec![
            Subscription::new("Monthly", 10.0, BillingCycle::Monthly, date(2025, 6, 5)),
            Subscription::new("Quarterly", 30.0, BillingCycle::Quarterly, date(2025, 1, 31)),
            Subscription::new("Yearly", 99.0, BillingCycle::Yearly, date(2024, 2, 29)),
            Subscription::new("Variable", 5.0, BillingCycle::Variable, date(2025, 6, 1)),
            Subscription::new("Paused", 5.0, BillingCycle::Monthly, date(2025, 6, 1))
                .with_status(SubscriptionStatus::Cancelled),
            Subscription::new("Future", 5.0, BillingCycle::Monthly, date(2025, 9, 1)),
        ];
        assert_eq!(roll_forward_all(&mut subs, today), 3);
        let dates: Vec<Option<NaiveDate>> =
            subs.iter().map(|s| s.next_payment_date.date()).collect();
        assert_eq!(
            dates,
            vec![
                Some(date(2025, 9, 5)),
                Some(date(2025, 10, 31)),
                Some(date(2026, 2, 28)),
                Some(date(2025, 6, 1)),
                Some(date(2025, 6, 1)),
                Some(date(2025, 9, 1)),
            ]
        );
    }

    #[test]
    fn due_today_stays_put() {
        let today = date(2025, 8, 20);
        let mut sub = Subscription::new("Today", 10.0, BillingCycle::Monthly, today);
        assert!(!roll_forward(&mut sub, today));
    }
}
