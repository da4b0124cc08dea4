use std::iter::FusedIterator;

use chrono::{Datelike, Days, Duration, NaiveDate};
use tracing::{debug, trace, warn};

use super::anchor::AnchorSet;
use super::week::{thursday_of_week, WeekBucket, DAYS_PER_WEEK};
use crate::domain::time_interval::days_in_month;

/// Splits the calendar into Thursday-to-Wednesday weeks numbered within their month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPartitioner {
    anchors: AnchorSet,
}

impl WeekPartitioner {
    pub fn new(anchors: AnchorSet) -> Self {
        Self { anchors }
    }

    /// Partitioner with plain ordinal numbering and no anchors.
    pub fn unanchored() -> Self {
        Self::new(AnchorSet::empty())
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    /// Every Thursday of `month` (1-based) in ascending order, as empty buckets.
    ///
    /// Weeks are numbered by their ordinal position unless an anchor falls in
    /// the month, in which case Thursdays before the anchor are left out and
    /// the rest count from the anchor's week number. An invalid month yields
    /// no weeks.
    pub fn weeks_for_month(&self, year: i32, month: u32, today: NaiveDate) -> Vec<WeekBucket> {
        let (Some(first), Some(last_day)) = (
            NaiveDate::from_ymd_opt(year, month, 1),
            days_in_month(year, month),
        ) else {
            debug!(year, month, "no weeks for invalid month");
            return Vec::new();
        };
        let first_thursday = thursday_of_week(first + Duration::days(6)).day();
        let anchor = self.anchors.for_month(year, month);

        let weeks: Vec<WeekBucket> = (first_thursday..=last_day)
            .step_by(7)
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .enumerate()
            .filter_map(|(index, thursday)| {
                let number = match anchor {
                    Some(anchor) => anchor.week_number_for(thursday)?,
                    None => index as u32 + 1,
                };
                Some(WeekBucket::new(thursday, number, today))
            })
            .collect();
        trace!(year, month, weeks = weeks.len(), anchored = anchor.is_some(), "partitioned month");
        weeks
    }

    /// Bucket containing `today`.
    pub fn current_week(&self, today: NaiveDate) -> WeekBucket {
        self.resolve_week(thursday_of_week(today), today.year(), today.month(), today)
    }

    /// Lazily yields `count` consecutive weeks starting with the current one.
    ///
    /// The sequence stops early at the last week that fits in the calendar.
    pub fn upcoming_weeks(&self, count: usize, today: NaiveDate) -> UpcomingWeeks<'_> {
        let start = thursday_of_week(today);
        let room = (NaiveDate::MAX - start).num_days() - (DAYS_PER_WEEK - 1);
        let available = if room < 0 {
            0
        } else {
            usize::try_from(room / DAYS_PER_WEEK + 1).unwrap_or(usize::MAX)
        };
        if available < count {
            warn!(count, available, "horizon runs past the end of the calendar; truncating");
        }
        UpcomingWeeks {
            partitioner: self,
            today,
            next_start: start,
            emitted: 0,
            count: count.min(available),
        }
    }

    /// Finds the bucket opened by `thursday`, looking first in the reference
    /// month and then in the month before it.
    ///
    /// A Thursday that an anchor removed from its own month continues the
    /// previous month's numbering. When nothing matches at all (an anchor that
    /// also swallowed the previous month's tail), a week 1 bucket is
    /// synthesized rather than failing.
    fn resolve_week(
        &self,
        thursday: NaiveDate,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> WeekBucket {
        if let Some(week) = self
            .weeks_for_month(year, month, today)
            .into_iter()
            .find(|week| week.start_date == thursday)
        {
            return week;
        }

        let (prev_year, prev_month) = previous_month(year, month);
        let previous = self.weeks_for_month(prev_year, prev_month, today);
        if let Some(week) = previous.iter().find(|week| week.start_date == thursday) {
            return week.clone();
        }
        if let Some(last) = previous.last().filter(|last| last.start_date < thursday) {
            let elapsed = ((thursday - last.start_date).num_days() / 7) as u32;
            debug!(%thursday, previous = %last.start_date, "continuing previous month's week sequence");
            return WeekBucket::new(thursday, last.week_number + elapsed, today);
        }

        warn!(%thursday, year, month, "no week sequence matched; synthesizing week 1");
        WeekBucket::new(thursday, 1, today)
    }
}

/// `(year, month)` of the month before, rolling January back to December.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Iterator returned by [`WeekPartitioner::upcoming_weeks`].
///
/// Each step re-derives the month, year and week number of the next Thursday.
#[derive(Debug, Clone)]
pub struct UpcomingWeeks<'a> {
    partitioner: &'a WeekPartitioner,
    today: NaiveDate,
    next_start: NaiveDate,
    emitted: usize,
    count: usize,
}

impl Iterator for UpcomingWeeks<'_> {
    type Item = WeekBucket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted >= self.count {
            return None;
        }
        let week = if self.emitted == 0 {
            self.partitioner.current_week(self.today)
        } else {
            let start = self.next_start;
            self.partitioner
                .resolve_week(start, start.year(), start.month(), self.today)
        };
        self.emitted += 1;
        match week.start_date.checked_add_days(Days::new(DAYS_PER_WEEK as u64)) {
            Some(next) => self.next_start = next,
            None => self.count = self.emitted,
        }
        Some(week)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.emitted;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UpcomingWeeks<'_> {}

impl FusedIterator for UpcomingWeeks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::anchor::WeekAnchor;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn starts(weeks: &[WeekBucket]) -> Vec<NaiveDate> {
        weeks.iter().map(|week| week.start_date).collect()
    }

    #[test]
    fn lists_every_thursday_of_the_month() {
        let weeks = WeekPartitioner::default().weeks_for_month(2025, 7, date(2025, 7, 1));
        assert_eq!(
            starts(&weeks),
            vec![
                date(2025, 7, 3),
                date(2025, 7, 10),
                date(2025, 7, 17),
                date(2025, 7, 24),
                date(2025, 7, 31),
            ]
        );
        let numbers: Vec<u32> = weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn first_of_month_on_thursday_is_week_one() {
        let weeks = WeekPartitioner::default().weeks_for_month(2026, 1, date(2026, 1, 1));
        assert_eq!(weeks[0].start_date, date(2026, 1, 1));
        assert!(weeks[0].is_current_week);
        assert!(weeks.iter().skip(1).all(|week| !week.is_current_week));
    }

    #[test]
    fn invalid_month_yields_nothing() {
        assert!(WeekPartitioner::default()
            .weeks_for_month(2025, 13, date(2025, 1, 1))
            .is_empty());
    }

    #[test]
    fn anchor_drops_earlier_thursdays_and_counts_from_itself() {
        let anchors = AnchorSet::new(vec![WeekAnchor::new(date(2025, 10, 16), 1).unwrap()]).unwrap();
        let partitioner = WeekPartitioner::new(anchors);
        let weeks = partitioner.weeks_for_month(2025, 10, date(2025, 10, 1));
        assert_eq!(
            starts(&weeks),
            vec![date(2025, 10, 16), date(2025, 10, 23), date(2025, 10, 30)]
        );
        let numbers: Vec<u32> = weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn anchor_excluded_thursday_continues_previous_month() {
        let anchors = AnchorSet::new(vec![WeekAnchor::new(date(2025, 10, 16), 1).unwrap()]).unwrap();
        let partitioner = WeekPartitioner::new(anchors);
        // September 2025 Thursdays: 4, 11, 18, 25.
        let week = partitioner.current_week(date(2025, 10, 10));
        assert_eq!(week.start_date, date(2025, 10, 9));
        assert_eq!(week.week_number, 6);
        assert!(week.is_current_week);
    }

    #[test]
    fn current_week_early_in_month_falls_back_to_previous_month() {
        let week = WeekPartitioner::default().current_week(date(2025, 8, 3));
        assert_eq!(week.start_date, date(2025, 7, 31));
        assert_eq!(week.week_number, 5);
        assert_eq!(week.month_label, "July 2025");
    }

    #[test]
    fn january_lookup_rolls_back_to_december() {
        // Jan 1 2027 is a Friday; its Thursday is Dec 31 2026.
        let week = WeekPartitioner::default().current_week(date(2027, 1, 2));
        assert_eq!(week.start_date, date(2026, 12, 31));
        assert_eq!(week.week_number, 5);
        assert_eq!(week.month_label, "December 2026");
    }

    #[test]
    fn synthesizes_week_one_when_no_sequence_matches() {
        let partitioner = WeekPartitioner::default();
        // October Thursday looked up against December: neither December nor
        // November can place it.
        let today = date(2025, 10, 24);
        let week = partitioner.resolve_week(date(2025, 10, 23), 2025, 12, today);
        assert_eq!(week.start_date, date(2025, 10, 23));
        assert_eq!(week.end_date, date(2025, 10, 29));
        assert_eq!(week.week_number, 1);
        assert!(week.is_current_week);
    }

    #[test]
    fn anchor_on_last_thursday_keeps_it_reachable() {
        let anchors = AnchorSet::new(vec![WeekAnchor::new(date(2025, 10, 30), 1).unwrap()]).unwrap();
        let partitioner = WeekPartitioner::new(anchors);
        let week = partitioner.current_week(date(2025, 11, 1));
        assert_eq!(week.start_date, date(2025, 10, 30));
        assert_eq!(week.week_number, 1);

        // Oct 23 is dropped from October and continues September (last: Sep 25, week 4).
        let week = partitioner.current_week(date(2025, 10, 24));
        assert_eq!(week.start_date, date(2025, 10, 23));
        assert_eq!(week.week_number, 8);
    }

    #[test]
    fn upcoming_weeks_are_contiguous_thursdays() {
        let partitioner = WeekPartitioner::default();
        let weeks: Vec<WeekBucket> = partitioner.upcoming_weeks(12, date(2025, 12, 20)).collect();
        assert_eq!(weeks.len(), 12);
        assert!(weeks[0].is_current_week);
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].start_date, pair[0].start_date + Duration::days(7));
        }
        for week in &weeks {
            assert_eq!(week.start_date.weekday(), Weekday::Thu);
            assert_eq!((week.end_date - week.start_date).num_days(), 6);
        }
        let january: Vec<u32> = weeks
            .iter()
            .filter(|week| week.month_label == "January 2026")
            .map(|week| week.week_number)
            .collect();
        assert_eq!(january, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn upcoming_weeks_stop_at_the_end_of_the_calendar() {
        let partitioner = WeekPartitioner::default();
        let today = NaiveDate::MAX - Duration::days(30);
        let weeks = partitioner.upcoming_weeks(4_000_000_000, today);
        let expected = weeks.len();
        assert!(expected <= 5);
        let collected: Vec<WeekBucket> = weeks.collect();
        assert_eq!(collected.len(), expected);
        assert!(collected.iter().all(|week| week.end_date <= NaiveDate::MAX));
    }

    #[test]
    fn upcoming_weeks_reports_exact_size() {
        let partitioner = WeekPartitioner::default();
        let mut weeks = partitioner.upcoming_weeks(3, date(2025, 8, 1));
        assert_eq!(weeks.len(), 3);
        weeks.next();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks.by_ref().count(), 2);
        assert!(weeks.next().is_none());
    }
}
