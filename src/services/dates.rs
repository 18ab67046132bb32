//! Reporting date range and bucket boundary resolution

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

use crate::sources::{day_start, last_instant_of_month, month_start, HistoryWindowProvider};
use crate::types::{DateRange, Frequency};

/// Number of monthly buckets on the last-6-months sheet
const MONTHLY_BUCKETS: usize = 6;

/// Resolve the reporting range and ordered bucket starts for one sheet.
///
/// Daily mode covers "last month": an anchor date opens the range at
/// the anchor and closes it at the last instant of the anchor's month;
/// without an anchor both bounds come from the history window provider.
/// Monthly mode covers "last 6 months" ending in the anchor's (or the
/// window end's) month.
///
/// Daily bucket count equals the day-of-month of the range end, not the
/// day-count of the month containing the range start; with a mid-month
/// anchor the buckets run past the month boundary. Kept for
/// compatibility with the source system's reports.
pub fn resolve(
    frequency: Frequency,
    anchor: Option<NaiveDate>,
    window: &dyn HistoryWindowProvider,
) -> (DateRange, Vec<DateTime<Utc>>) {
    let range = match frequency {
        Frequency::Daily => match anchor {
            Some(anchor) => DateRange {
                start: day_start(anchor),
                end: last_instant_of_month(anchor),
            },
            None => {
                let (start, end) = window.window();
                DateRange { start, end }
            }
        },
        Frequency::Monthly => {
            let end_month = anchor.unwrap_or_else(|| window.window().1.date_naive());
            let end = last_instant_of_month(end_month);
            let start = month_start(end_month) - Months::new(MONTHLY_BUCKETS as u32 - 1);
            DateRange {
                start: day_start(start),
                end,
            }
        }
    };

    let start_date = range.start.date_naive();
    let buckets = match frequency {
        Frequency::Daily => (0..range.end.day() as u64)
            .map(|i| day_start(start_date + Days::new(i)))
            .collect(),
        Frequency::Monthly => (0..MONTHLY_BUCKETS as u32)
            .map(|i| day_start(start_date + Months::new(i)))
            .collect(),
    };
    (range, buckets)
}
