use chrono::{Local, NaiveDate};

/// Clock abstracts access to the current date so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock. Dates follow the local time zone, where paydays happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
