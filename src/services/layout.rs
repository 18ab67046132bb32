//! Deterministic sheet structure: header rows, merges, widths, row order

use chrono::{DateTime, Utc};

use crate::sheet::{CellIntent, CellRef, ColumnSpec, StyleTag};
use crate::types::{Account, BucketSeries, Frequency, ReportData};

/// First body row (A1 row 4); rows 1-3 hold the header
pub const FIRST_BODY_ROW: u32 = 3;

pub(crate) const ACCOUNT_COL: u16 = 0;
pub(crate) const USAGE_COL: u16 = 1;

const ACCOUNT_WIDTH: f64 = 30.0;
const USAGE_WIDTH: f64 = 35.0;
const BUCKET_WIDTH: f64 = 12.5;
const TOTAL_WIDTH: f64 = 15.0;

/// Column of bucket `i`'s cost cell. Bucket 0 has a single column;
/// every later bucket occupies a variation + cost pair.
pub fn cost_col(bucket: usize) -> u16 {
    if bucket == 0 {
        2
    } else {
        (bucket * 2 + 2) as u16
    }
}

/// Column of bucket `i`'s variation cell (buckets 1 and later only)
pub fn variation_col(bucket: usize) -> u16 {
    (bucket * 2 + 1) as u16
}

/// Column of the row-total cell for `buckets` buckets
pub fn total_col(buckets: usize) -> u16 {
    (buckets * 2 + 1) as u16
}

fn header_styled(cell: CellIntent) -> CellIntent {
    cell.styled(StyleTag::Borders)
        .styled(StyleTag::Bold)
        .styled(StyleTag::Centered)
}

/// Build the three-row header and column widths for one sheet
pub fn header(
    frequency: Frequency,
    buckets: &[DateTime<Utc>],
) -> (Vec<CellIntent>, Vec<ColumnSpec>) {
    let last_cost = cost_col(buckets.len().saturating_sub(1));
    let total = total_col(buckets.len());
    let mut cells = Vec::with_capacity(buckets.len() * 3 + 2);

    cells.push(header_styled(
        CellIntent::text(CellRef::new(0, ACCOUNT_COL), "Account")
            .merged_to(CellRef::new(2, ACCOUNT_COL)),
    ));
    cells.push(header_styled(
        CellIntent::text(CellRef::new(0, USAGE_COL), "Usage type")
            .merged_to(CellRef::new(2, USAGE_COL)),
    ));
    let title = CellIntent::text(CellRef::new(0, 2), frequency.section_title());
    cells.push(header_styled(if last_cost > 2 {
        title.merged_to(CellRef::new(0, last_cost))
    } else {
        title
    }));
    cells.push(header_styled(
        CellIntent::text(CellRef::new(0, total), "Total").merged_to(CellRef::new(2, total)),
    ));

    for (index, bucket) in buckets.iter().enumerate() {
        let label = frequency.bucket_label(*bucket);
        if index == 0 {
            cells.push(header_styled(CellIntent::text(CellRef::new(1, 2), label)));
            cells.push(header_styled(CellIntent::text(CellRef::new(2, 2), "Cost")));
        } else {
            let variation = variation_col(index);
            let cost = cost_col(index);
            cells.push(header_styled(
                CellIntent::text(CellRef::new(1, variation), label)
                    .merged_to(CellRef::new(1, cost)),
            ));
            cells.push(header_styled(CellIntent::text(
                CellRef::new(2, variation),
                "Variation",
            )));
            cells.push(header_styled(CellIntent::text(CellRef::new(2, cost), "Cost")));
        }
    }

    let columns = vec![
        ColumnSpec::new(ACCOUNT_COL, ACCOUNT_COL, ACCOUNT_WIDTH),
        ColumnSpec::new(USAGE_COL, USAGE_COL, USAGE_WIDTH),
        ColumnSpec::new(2, last_cost, BUCKET_WIDTH),
        ColumnSpec::new(total, total, TOTAL_WIDTH),
    ];
    (cells, columns)
}

/// One body row per (account, product) pair, sorted by account id then
/// product name. ReportData is an unordered mapping; this sort is what
/// makes two runs over identical data emit identical rows.
pub fn sorted_rows(data: &ReportData) -> Vec<(&Account, &str, &BucketSeries)> {
    let mut rows: Vec<(&Account, &str, &BucketSeries)> = data
        .iter()
        .flat_map(|(account, report)| {
            report
                .iter()
                .map(move |(product, series)| (account, product.as_str(), series))
        })
        .collect();
    rows.sort_by(|a, b| a.0.id.cmp(&b.0.id).then_with(|| a.1.cmp(b.1)));
    rows
}
