//! Per-account cost data aggregation
//!
//! Fans out one cost-diff fetch per account and reshapes the raw
//! product → point lists into bucket-keyed series. The first failure
//! (source error or unparseable timestamp) aborts the whole call; the
//! caller never sees partial data.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, error};

use crate::sources::CostDiffSource;
use crate::types::{
    Account, AccountReport, BucketSeries, DateRange, Frequency, PricePoint, RawPricePoint,
    ReportData, ReportError, Result, SOURCE_TIMESTAMP_FORMAT,
};

/// Fetch and reshape cost-diff data for every account.
///
/// Per-account work is independent and runs on the rayon pool; the
/// output is an unordered mapping, so row order is imposed later by
/// the layout sort, not by completion order.
pub fn aggregate(
    source: &dyn CostDiffSource,
    accounts: &[Account],
    range: &DateRange,
    frequency: Frequency,
) -> Result<ReportData> {
    debug!(
        accounts = accounts.len(),
        start = %range.start,
        end = %range.end,
        granularity = frequency.granularity(),
        "fetching cost variation data"
    );
    let reports = accounts
        .par_iter()
        .map(|account| {
            let raw = match source.fetch(account, range, frequency.granularity()) {
                Ok(raw) => raw,
                Err(e) => {
                    error!(
                        account = %account.id,
                        start = %range.start,
                        end = %range.end,
                        error = %e,
                        "cost source failed"
                    );
                    return Err(e);
                }
            };
            Ok((account.clone(), shape_account(account, raw)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(reports.into_iter().collect())
}

/// Key one account's raw points by parsed bucket-start timestamp.
/// No interpolation, no cross-bucket merging.
fn shape_account(
    account: &Account,
    raw: HashMap<String, Vec<RawPricePoint>>,
) -> Result<AccountReport> {
    let mut report = AccountReport::with_capacity(raw.len());
    for (product, points) in raw {
        let mut series = BucketSeries::with_capacity(points.len());
        for point in points {
            let date = parse_timestamp(&point.date).map_err(|source| {
                error!(account = %account.id, raw = %point.date, "failed to parse timestamp");
                ReportError::TimestampParse {
                    account: account.id.clone(),
                    raw: point.date.clone(),
                    source,
                }
            })?;
            series.insert(
                date,
                PricePoint {
                    date,
                    cost: point.cost,
                },
            );
        }
        report.insert(product, series);
    }
    Ok(report)
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, SOURCE_TIMESTAMP_FORMAT).map(|dt| dt.and_utc())
}
