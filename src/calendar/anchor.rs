use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::SubTrackerError;

/// Pins a Thursday to a fixed week number within its month.
///
/// Thursdays of the same month that fall before the anchor are dropped from
/// that month's sequence; later ones count whole weeks from the anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekAnchor {
    pub date: NaiveDate,
    pub week_number: u32,
}

impl WeekAnchor {
    pub fn new(date: NaiveDate, week_number: u32) -> Result<Self, SubTrackerError> {
        let anchor = Self { date, week_number };
        anchor.validate()?;
        Ok(anchor)
    }

    pub fn validate(&self) -> Result<(), SubTrackerError> {
        if self.date.weekday() != Weekday::Thu {
            return Err(SubTrackerError::InvalidAnchor {
                date: self.date,
                reason: format!("anchor must fall on a Thursday, not {}", self.date.weekday()),
            });
        }
        if self.week_number == 0 {
            return Err(SubTrackerError::InvalidAnchor {
                date: self.date,
                reason: "week numbers start at 1".into(),
            });
        }
        Ok(())
    }

    fn covers(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Week number for a Thursday in the anchor's month, `None` before the anchor.
    pub fn week_number_for(&self, thursday: NaiveDate) -> Option<u32> {
        if thursday < self.date {
            return None;
        }
        let elapsed = (thursday - self.date).num_days() / 7;
        Some(self.week_number + elapsed as u32)
    }
}

/// Validated collection of week-numbering anchors, ordered by date.
///
/// The default set carries the single payroll correction of August 7, 2025
/// (week 1 of August 2025).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeekAnchor>", into = "Vec<WeekAnchor>")]
pub struct AnchorSet {
    anchors: Vec<WeekAnchor>,
}

impl AnchorSet {
    pub fn new(mut anchors: Vec<WeekAnchor>) -> Result<Self, SubTrackerError> {
        for anchor in &anchors {
            anchor.validate()?;
        }
        anchors.sort_by_key(|anchor| anchor.date);
        anchors.dedup_by_key(|anchor| anchor.date);
        Ok(Self { anchors })
    }

    pub fn empty() -> Self {
        Self {
            anchors: Vec::new(),
        }
    }

    /// Earliest anchor inside the given month, if any.
    pub fn for_month(&self, year: i32, month: u32) -> Option<&WeekAnchor> {
        self.anchors.iter().find(|anchor| anchor.covers(year, month))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeekAnchor> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        let anchors = NaiveDate::from_ymd_opt(2025, 8, 7)
            .map(|date| WeekAnchor {
                date,
                week_number: 1,
            })
            .into_iter()
            .collect();
        Self { anchors }
    }
}

impl TryFrom<Vec<WeekAnchor>> for AnchorSet {
    type Error = SubTrackerError;

    fn try_from(value: Vec<WeekAnchor>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnchorSet> for Vec<WeekAnchor> {
    fn from(value: AnchorSet) -> Self {
        value.anchors
    }
}
