//! Cell-intent descriptors and the sink boundary to the rendering engine
//!
//! The report pipeline never touches a workbook directly: it describes
//! every cell as an immutable [`CellIntent`] (address, content, style
//! tags, highlight rules) and hands those to a [`SheetSink`]. The xlsx
//! backend lives in [`xlsx`]; tests use the in-memory recording sink.

mod xlsx;

pub use xlsx::XlsxSink;

use crate::types::Result;

/// Zero-based cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// A1-style address, e.g. (3, 2) → "C4"
    pub fn a1(&self) -> String {
        format!("{}{}", col_letters(self.col), self.row + 1)
    }
}

/// Column letters for a zero-based column index ("A", "B", ..., "AA")
pub fn col_letters(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// What a cell holds
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Number(f64),
    Formula(String),
}

/// Named style tags resolved by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    /// Currency number format
    Price,
    /// Percentage number format
    Percentage,
    Bold,
    Borders,
    Centered,
}

/// Predicate for a conditional highlight rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Negative,
    Positive,
    Zero,
}

/// Border color applied when a highlight rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightColor {
    Green,
    Red,
}

/// Conditional border highlight evaluated against a cell's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRule {
    pub when: Comparison,
    pub color: HighlightColor,
}

impl HighlightRule {
    pub fn new(when: Comparison, color: HighlightColor) -> Self {
        Self { when, color }
    }
}

/// An immutable description of one cell, constructed once and handed to
/// the sink. Replaces order-dependent mutating cell builders.
#[derive(Debug, Clone, PartialEq)]
pub struct CellIntent {
    pub at: CellRef,
    pub content: CellContent,
    /// Bottom-right corner of a merged range, when the cell spans one
    pub merge_to: Option<CellRef>,
    pub styles: Vec<StyleTag>,
    pub highlights: Vec<HighlightRule>,
}

impl CellIntent {
    pub fn text(at: CellRef, text: impl Into<String>) -> Self {
        Self::with_content(at, CellContent::Text(text.into()))
    }

    pub fn number(at: CellRef, value: f64) -> Self {
        Self::with_content(at, CellContent::Number(value))
    }

    pub fn formula(at: CellRef, formula: impl Into<String>) -> Self {
        Self::with_content(at, CellContent::Formula(formula.into()))
    }

    fn with_content(at: CellRef, content: CellContent) -> Self {
        Self {
            at,
            content,
            merge_to: None,
            styles: Vec::new(),
            highlights: Vec::new(),
        }
    }

    pub fn merged_to(mut self, to: CellRef) -> Self {
        self.merge_to = Some(to);
        self
    }

    pub fn styled(mut self, tag: StyleTag) -> Self {
        self.styles.push(tag);
        self
    }

    pub fn highlighted(mut self, rule: HighlightRule) -> Self {
        self.highlights.push(rule);
        self
    }
}

/// Width setting for a contiguous column range (inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub first: u16,
    pub last: u16,
    pub width: f64,
}

impl ColumnSpec {
    pub fn new(first: u16, last: u16, width: f64) -> Self {
        Self { first, last, width }
    }
}

/// Boundary to the spreadsheet rendering engine
pub trait SheetSink {
    /// Create a sheet with the given name
    fn add_sheet(&mut self, name: &str) -> Result<()>;

    /// Write one cell (value or formula, styles, merge, highlights)
    fn write_cell(&mut self, sheet: &str, cell: &CellIntent) -> Result<()>;

    /// Set the width of a column range
    fn set_column_width(&mut self, sheet: &str, spec: &ColumnSpec) -> Result<()>;
}

/// In-memory sink capturing every operation, for assertions
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sheets: Vec<String>,
    pub cells: Vec<(String, CellIntent)>,
    pub columns: Vec<(String, ColumnSpec)>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells written to one sheet, in emission order
    pub fn cells_for(&self, sheet: &str) -> Vec<&CellIntent> {
        self.cells
            .iter()
            .filter(|(s, _)| s == sheet)
            .map(|(_, c)| c)
            .collect()
    }

    /// The cell at a given A1 address on a sheet, if written
    pub fn cell_at(&self, sheet: &str, a1: &str) -> Option<&CellIntent> {
        self.cells_for(sheet).into_iter().find(|c| c.at.a1() == a1)
    }
}

#[cfg(test)]
impl SheetSink for RecordingSink {
    fn add_sheet(&mut self, name: &str) -> Result<()> {
        self.sheets.push(name.to_string());
        Ok(())
    }

    fn write_cell(&mut self, sheet: &str, cell: &CellIntent) -> Result<()> {
        self.cells.push((sheet.to_string(), cell.clone()));
        Ok(())
    }

    fn set_column_width(&mut self, sheet: &str, spec: &ColumnSpec) -> Result<()> {
        self.columns.push((sheet.to_string(), *spec));
        Ok(())
    }
}
