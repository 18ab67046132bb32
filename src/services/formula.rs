//! Body-row cell generation: literal costs, variation formulas, totals

use chrono::{DateTime, Utc};

use super::layout::{cost_col, total_col, variation_col, ACCOUNT_COL, USAGE_COL};
use crate::sheet::{CellIntent, CellRef, Comparison, HighlightColor, HighlightRule, StyleTag};
use crate::types::{Account, BucketSeries};

fn body_styled(cell: CellIntent) -> CellIntent {
    cell.styled(StyleTag::Borders).styled(StyleTag::Centered)
}

/// Variation of a cost cell against the preceding bucket's cost cell,
/// guarded so a zero (or blank) previous cost renders blank instead of
/// a division error.
fn variation_formula(previous: &CellRef, current: &CellRef) -> String {
    format!(
        "IF({prev}=0,\"\",{cur}/{prev}-1)",
        prev = previous.a1(),
        cur = current.a1()
    )
}

/// Generate every cell of one body row.
///
/// Left to right: account label, product, then per bucket a literal
/// cost (omitted entirely when the bucket has no data) and, from the
/// second bucket on, a percentage-styled variation formula highlighted
/// green when costs fell and red when they rose or stayed flat. The
/// row closes with a SUM over all cost cells; blank cost cells count
/// as zero there by spreadsheet semantics.
pub fn row_cells(
    row: u32,
    account: &Account,
    product: &str,
    series: &BucketSeries,
    buckets: &[DateTime<Utc>],
) -> Vec<CellIntent> {
    let mut cells = Vec::with_capacity(buckets.len() * 2 + 3);
    cells.push(body_styled(CellIntent::text(
        CellRef::new(row, ACCOUNT_COL),
        account.to_string(),
    )));
    cells.push(body_styled(CellIntent::text(
        CellRef::new(row, USAGE_COL),
        product,
    )));

    let mut cost_refs = Vec::with_capacity(buckets.len());
    for (index, bucket) in buckets.iter().enumerate() {
        let cost_ref = CellRef::new(row, cost_col(index));
        if let Some(point) = series.get(bucket) {
            cells.push(body_styled(
                CellIntent::number(cost_ref, point.cost).styled(StyleTag::Price),
            ));
        }
        if index > 0 {
            let previous = cost_refs[index - 1];
            let variation = CellIntent::formula(
                CellRef::new(row, variation_col(index)),
                variation_formula(&previous, &cost_ref),
            )
            .styled(StyleTag::Percentage)
            .highlighted(HighlightRule::new(Comparison::Negative, HighlightColor::Green))
            .highlighted(HighlightRule::new(Comparison::Positive, HighlightColor::Red))
            .highlighted(HighlightRule::new(Comparison::Zero, HighlightColor::Red));
            cells.push(body_styled(variation));
        }
        cost_refs.push(cost_ref);
    }

    let sum_args: Vec<String> = cost_refs.iter().map(|r| r.a1()).collect();
    cells.push(body_styled(
        CellIntent::formula(
            CellRef::new(row, total_col(buckets.len())),
            format!("SUM({})", sum_args.join(",")),
        )
        .styled(StyleTag::Price),
    ));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellContent;
    use crate::sources::day_start;
    use crate::types::PricePoint;
    use chrono::NaiveDate;

    fn daily_buckets(count: u64) -> Vec<DateTime<Utc>> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count)
            .map(|i| day_start(start + chrono::Days::new(i)))
            .collect()
    }

    fn series_of(costs: &[(usize, f64)], buckets: &[DateTime<Utc>]) -> BucketSeries {
        costs
            .iter()
            .map(|(index, cost)| {
                let date = buckets[*index];
                (date, PricePoint { date, cost: *cost })
            })
            .collect()
    }

    fn cell_at<'a>(cells: &'a [CellIntent], a1: &str) -> Option<&'a CellIntent> {
        cells.iter().find(|c| c.at.a1() == a1)
    }

    const FIRST_BODY_ROW_FOR_TEST: u32 = 3;

    #[test]
    fn test_three_day_row_end_to_end() {
        // Account 111111111111, EC2, daily costs [100, 110, 90]
        let buckets = daily_buckets(3);
        let series = series_of(&[(0, 100.0), (1, 110.0), (2, 90.0)], &buckets);
        let account = Account::new("111111111111", "");
        let cells = row_cells(FIRST_BODY_ROW_FOR_TEST, &account, "EC2", &series, &buckets);

        assert_eq!(
            cell_at(&cells, "A4").unwrap().content,
            CellContent::Text("111111111111".into())
        );
        assert_eq!(
            cell_at(&cells, "B4").unwrap().content,
            CellContent::Text("EC2".into())
        );
        assert_eq!(cell_at(&cells, "C4").unwrap().content, CellContent::Number(100.0));
        assert_eq!(cell_at(&cells, "E4").unwrap().content, CellContent::Number(110.0));
        assert_eq!(cell_at(&cells, "G4").unwrap().content, CellContent::Number(90.0));

        let first_variation = cell_at(&cells, "D4").unwrap();
        assert_eq!(
            first_variation.content,
            CellContent::Formula("IF(C4=0,\"\",E4/C4-1)".into())
        );
        let second_variation = cell_at(&cells, "F4").unwrap();
        assert_eq!(
            second_variation.content,
            CellContent::Formula("IF(E4=0,\"\",G4/E4-1)".into())
        );

        // What the formulas evaluate to: +10% (red) and about -18.18% (green)
        assert!((110.0_f64 / 100.0 - 1.0 - 0.10).abs() < 1e-9);
        assert!((90.0_f64 / 110.0 - 1.0 - (-0.181818)).abs() < 1e-4);
        for variation in [first_variation, second_variation] {
            assert_eq!(
                variation.highlights,
                vec![
                    HighlightRule::new(Comparison::Negative, HighlightColor::Green),
                    HighlightRule::new(Comparison::Positive, HighlightColor::Red),
                    HighlightRule::new(Comparison::Zero, HighlightColor::Red),
                ]
            );
            assert!(variation.styles.contains(&StyleTag::Percentage));
        }

        // Total covers every cost cell, including the first bucket's
        assert_eq!(
            cell_at(&cells, "H4").unwrap().content,
            CellContent::Formula("SUM(C4,E4,G4)".into())
        );
    }

    #[test]
    fn test_missing_bucket_writes_no_cost_cell() {
        let buckets = daily_buckets(3);
        let series = series_of(&[(0, 100.0), (2, 90.0)], &buckets);
        let account = Account::new("111111111111", "");
        let cells = row_cells(3, &account, "EC2", &series, &buckets);

        // Bucket 1 has no data: no E4 cell, but D4's formula still exists
        assert!(cell_at(&cells, "E4").is_none());
        assert!(cell_at(&cells, "D4").is_some());
        // The SUM still references the blank cell (counts as 0)
        assert_eq!(
            cell_at(&cells, "H4").unwrap().content,
            CellContent::Formula("SUM(C4,E4,G4)".into())
        );
    }

    #[test]
    fn test_zero_previous_cost_formula_guard() {
        // Bucket 0 cost 0, bucket 1 cost 50: the guard renders blank
        let buckets = daily_buckets(2);
        let series = series_of(&[(0, 0.0), (1, 50.0)], &buckets);
        let account = Account::new("111111111111", "");
        let cells = row_cells(3, &account, "EC2", &series, &buckets);

        let variation = cell_at(&cells, "D4").unwrap();
        assert_eq!(
            variation.content,
            CellContent::Formula("IF(C4=0,\"\",E4/C4-1)".into())
        );
    }

    #[test]
    fn test_cost_cells_currency_styled() {
        let buckets = daily_buckets(2);
        let series = series_of(&[(0, 100.0), (1, 50.0)], &buckets);
        let account = Account::new("111111111111", "");
        let cells = row_cells(3, &account, "EC2", &series, &buckets);

        for a1 in ["C4", "E4", "F4"] {
            let cell = cell_at(&cells, a1).unwrap();
            assert!(cell.styles.contains(&StyleTag::Borders));
            assert!(cell.styles.contains(&StyleTag::Centered));
        }
        assert!(cell_at(&cells, "C4").unwrap().styles.contains(&StyleTag::Price));
        assert!(cell_at(&cells, "F4").unwrap().styles.contains(&StyleTag::Price));
    }

    #[test]
    fn test_account_label_rendering() {
        let buckets = daily_buckets(1);
        let series = series_of(&[(0, 1.0)], &buckets);
        let account = Account::new("111111111111", "Production");
        let cells = row_cells(3, &account, "EC2", &series, &buckets);
        assert_eq!(
            cell_at(&cells, "A4").unwrap().content,
            CellContent::Text("Production (111111111111)".into())
        );
    }

    #[test]
    fn test_single_bucket_row_has_no_variation() {
        let buckets = daily_buckets(1);
        let series = series_of(&[(0, 42.0)], &buckets);
        let account = Account::new("111111111111", "");
        let cells = row_cells(3, &account, "EC2", &series, &buckets);

        assert!(cells
            .iter()
            .all(|c| !matches!(&c.content, CellContent::Formula(f) if f.starts_with("IF"))));
        assert_eq!(
            cell_at(&cells, "D4").unwrap().content,
            CellContent::Formula("SUM(C4)".into())
        );
    }
}
