//! Report module descriptors and the sheet-generation pipeline
//!
//! The set of generated sheets is an explicit list of descriptors the
//! caller hands to [`generate`]; nothing is registered at load time.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::services::{aggregator, dates, formula, layout};
use crate::sheet::SheetSink;
use crate::sources::{CostDiffSource, HistoryWindowProvider};
use crate::types::{Account, Frequency, ReportData, Result};

pub const LAST_MONTH_SHEET: &str = "Cost Variations (Last Month)";
pub const LAST_6_MONTHS_SHEET: &str = "Cost Variations (Last 6 Months)";

/// One sheet to generate: display name, sheet name, frequency mode
#[derive(Debug, Clone, Copy)]
pub struct ReportModule {
    pub name: &'static str,
    pub sheet_name: &'static str,
    pub frequency: Frequency,
}

/// The two cost-variation sheets every workbook carries
pub fn default_modules() -> Vec<ReportModule> {
    vec![
        ReportModule {
            name: "Cost Variations (Last Month)",
            sheet_name: LAST_MONTH_SHEET,
            frequency: Frequency::Daily,
        },
        ReportModule {
            name: "Cost Variations (Last 6 Months)",
            sheet_name: LAST_6_MONTHS_SHEET,
            frequency: Frequency::Monthly,
        },
    ]
}

/// Run every module against the sink: resolve dates, aggregate, lay
/// out. Any failure aborts the whole multi-sheet generation, so the
/// caller never saves a partial workbook.
pub fn generate(
    modules: &[ReportModule],
    accounts: &[Account],
    anchor: Option<NaiveDate>,
    source: &dyn CostDiffSource,
    window: &dyn HistoryWindowProvider,
    sink: &mut dyn SheetSink,
) -> Result<()> {
    for module in modules {
        info!(module = module.name, "generating report sheet");
        let (range, buckets) = dates::resolve(module.frequency, anchor, window);
        let data = aggregator::aggregate(source, accounts, &range, module.frequency)?;
        populate_sheet(sink, module, &buckets, &data)?;
        debug!(
            module = module.name,
            rows = layout::sorted_rows(&data).len(),
            buckets = buckets.len(),
            "sheet populated"
        );
    }
    Ok(())
}

/// Write one sheet: header, column widths, then the sorted body rows.
/// The sheet is only touched after the full ReportData is assembled.
fn populate_sheet(
    sink: &mut dyn SheetSink,
    module: &ReportModule,
    buckets: &[chrono::DateTime<chrono::Utc>],
    data: &ReportData,
) -> Result<()> {
    sink.add_sheet(module.sheet_name)?;
    let (header_cells, columns) = layout::header(module.frequency, buckets);
    for cell in &header_cells {
        sink.write_cell(module.sheet_name, cell)?;
    }
    for spec in &columns {
        sink.set_column_width(module.sheet_name, spec)?;
    }

    let mut row = layout::FIRST_BODY_ROW;
    for (account, product, series) in layout::sorted_rows(data) {
        for cell in formula::row_cells(row, account, product, series, buckets) {
            sink.write_cell(module.sheet_name, &cell)?;
        }
        row += 1;
    }
    Ok(())
}
