//! External collaborators: the cost-diff source and the default history window

mod json_file;

pub use json_file::JsonCostSource;

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

use crate::types::{Account, DateRange, RawPricePoint, Result};

/// Cost-diff data source: product → raw time-series points for one
/// account over one range, at the requested granularity.
///
/// Possibly network I/O behind the scenes; opaque to the pipeline.
pub trait CostDiffSource: Send + Sync {
    fn fetch(
        &self,
        account: &Account,
        range: &DateRange,
        granularity: &str,
    ) -> Result<HashMap<String, Vec<RawPricePoint>>>;
}

/// Fallback reporting window used when no anchor date is given
pub trait HistoryWindowProvider {
    /// (start, end) of the default window, both inclusive
    fn window(&self) -> (DateTime<Utc>, DateTime<Utc>);
}

/// Default window: the previous calendar month relative to today
#[derive(Debug, Clone)]
pub struct CalendarHistoryWindow {
    today: NaiveDate,
}

impl CalendarHistoryWindow {
    pub fn new() -> Self {
        Self {
            today: Utc::now().date_naive(),
        }
    }

    /// Pin "today" to a fixed date (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for CalendarHistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryWindowProvider for CalendarHistoryWindow {
    fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let previous_month = month_start(self.today) - Months::new(1);
        (day_start(previous_month), last_instant_of_month(previous_month))
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists
    date.with_day(1).unwrap()
}

/// Midnight UTC of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Last nanosecond of the month containing `date`
pub fn last_instant_of_month(date: NaiveDate) -> DateTime<Utc> {
    let last_day = month_start(date) + Months::new(1) - Days::new(1);
    last_day
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap()
        .and_utc()
}
