//! xlsx rendering backend over rust_xlsxwriter

use std::path::Path;

use rust_xlsxwriter::{
    Color, ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatAlign, FormatBorder,
    Workbook,
};

use super::{
    CellContent, CellIntent, ColumnSpec, Comparison, HighlightColor, HighlightRule, SheetSink,
    StyleTag,
};
use crate::types::{ReportError, Result};

const CURRENCY_FORMAT: &str = "$#,##0.00";
const PERCENTAGE_FORMAT: &str = "0.00%";

/// SheetSink writing an xlsx workbook
pub struct XlsxSink {
    workbook: Workbook,
}

impl XlsxSink {
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
        }
    }

    /// Serialize the workbook to disk; nothing is written on earlier errors
    pub fn save(mut self, path: &Path) -> Result<()> {
        self.workbook.save(path)?;
        Ok(())
    }
}

impl Default for XlsxSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetSink for XlsxSink {
    fn add_sheet(&mut self, name: &str) -> Result<()> {
        self.workbook.add_worksheet().set_name(name)?;
        Ok(())
    }

    fn write_cell(&mut self, sheet: &str, cell: &CellIntent) -> Result<()> {
        let worksheet = self.workbook.worksheet_from_name(sheet)?;
        let format = format_for(&cell.styles);
        let (row, col) = (cell.at.row, cell.at.col);

        if let Some(to) = cell.merge_to {
            // Only header text spans merged ranges
            let text = match &cell.content {
                CellContent::Text(text) => text,
                other => {
                    return Err(ReportError::Layout(format!(
                        "merged cell {} holds non-text content {:?}",
                        cell.at.a1(),
                        other
                    )))
                }
            };
            worksheet.merge_range(row, col, to.row, to.col, text, &format)?;
        } else {
            match &cell.content {
                CellContent::Text(text) => {
                    worksheet.write_string_with_format(row, col, text, &format)?;
                }
                CellContent::Number(value) => {
                    worksheet.write_number_with_format(row, col, *value, &format)?;
                }
                CellContent::Formula(formula) => {
                    worksheet.write_formula_with_format(row, col, formula.as_str(), &format)?;
                }
            }
        }

        for rule in &cell.highlights {
            let conditional = conditional_for(rule);
            worksheet.add_conditional_format(row, col, row, col, &conditional)?;
        }
        Ok(())
    }

    fn set_column_width(&mut self, sheet: &str, spec: &ColumnSpec) -> Result<()> {
        let worksheet = self.workbook.worksheet_from_name(sheet)?;
        for col in spec.first..=spec.last {
            worksheet.set_column_width(col, spec.width)?;
        }
        Ok(())
    }
}

fn format_for(styles: &[StyleTag]) -> Format {
    styles.iter().fold(Format::new(), |format, tag| match tag {
        StyleTag::Price => format.set_num_format(CURRENCY_FORMAT),
        StyleTag::Percentage => format.set_num_format(PERCENTAGE_FORMAT),
        StyleTag::Bold => format.set_bold(),
        StyleTag::Borders => format.set_border(FormatBorder::Thin),
        StyleTag::Centered => format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
    })
}

fn conditional_for(rule: &HighlightRule) -> ConditionalFormatCell {
    let predicate = match rule.when {
        Comparison::Negative => ConditionalFormatCellRule::LessThan(0.0),
        Comparison::Positive => ConditionalFormatCellRule::GreaterThan(0.0),
        Comparison::Zero => ConditionalFormatCellRule::EqualTo(0.0),
    };
    let color = match rule.color {
        HighlightColor::Green => Color::Green,
        HighlightColor::Red => Color::Red,
    };
    let effect = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(color);
    ConditionalFormatCell::new()
        .set_rule(predicate)
        .set_format(effect)
}
