use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Month,
    Year,
}

/// A fixed recurrence step such as "every 3 months".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub const fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Advances `from` by whole steps until it is on or after `reference`.
    /// Dates already on or after `reference` are returned unchanged.
    ///
    /// Steps clamp to the last day of the target month, so Jan 31 + 1 month
    /// lands on Feb 28/29. Stepping stops at the last representable date.
    pub fn first_on_or_after(&self, from: NaiveDate, reference: NaiveDate) -> NaiveDate {
        if self.every == 0 {
            return from;
        }
        let mut date = from;
        let mut steps = 1u32;
        while date < reference {
            // Re-derive from the original date so clamped month ends do not drift.
            match self.advance(from, steps) {
                Some(next) => date = next,
                None => break,
            }
            steps = steps.saturating_add(1);
        }
        date
    }

    fn advance(&self, from: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let months = match self.unit {
            TimeUnit::Month => self.every.checked_mul(steps)?,
            TimeUnit::Year => self.every.checked_mul(steps)?.checked_mul(12)?,
        };
        from.checked_add_months(Months::new(months))
    }
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some((next - first).num_days() as u32)
}
