//! Report data model: accounts, price points, bucketed series

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Timestamp format used by the cost-diff source (ISO-8601 with milliseconds)
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// A billing account: opaque identifier plus display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

impl Account {
    #[allow(dead_code)] // Used in tests
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.label, self.id)
        }
    }
}

/// One cost observation as returned by the cost-diff source (unparsed timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPricePoint {
    pub date: String,
    pub cost: f64,
}

/// One cost observation with its timestamp parsed
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub cost: f64,
}

/// Bucket-start timestamp → price point, for one (account, product) pair.
/// A missing key means "no data", never an implicit zero.
pub type BucketSeries = HashMap<DateTime<Utc>, PricePoint>;

/// Product name → bucket series, for one account
pub type AccountReport = HashMap<String, BucketSeries>;

/// Account → per-product series: the full dataset handed to layout
pub type ReportData = HashMap<Account, AccountReport>;

/// Inclusive reporting range; `end` is the last nanosecond of its day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Reporting frequency: one sheet per supported mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// One bucket per day over the last month
    Daily,
    /// One bucket per calendar month over the last 6 months
    Monthly,
}

impl Frequency {
    /// Aggregation label passed to the cost-diff source
    pub fn granularity(&self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Monthly => "month",
        }
    }

    /// Cost-section title in header row 1
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Daily => "Daily Cost",
            Self::Monthly => "Monthly Cost",
        }
    }

    /// Formatted bucket label for header row 2
    pub fn bucket_label(&self, date: DateTime<Utc>) -> String {
        let layout = match self {
            Self::Daily => "%Y-%m-%d",
            Self::Monthly => "%Y-%m",
        };
        date.format(layout).to_string()
    }
}
