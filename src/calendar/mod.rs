//! Thursday-to-Wednesday pay-period calendar.
//!
//! Weeks open on a Thursday (the payday) and close on the following
//! Wednesday. Each week is numbered within the month its Thursday falls in,
//! subject to the configured [`AnchorSet`].

pub mod anchor;
pub mod partitioner;
pub mod week;

pub use anchor::{AnchorSet, WeekAnchor};
pub use partitioner::{previous_month, UpcomingWeeks, WeekPartitioner};
pub use week::{month_label, thursday_of_week, wednesday_of_week, WeekBucket};
