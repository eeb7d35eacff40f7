//! Column sources: where the cells of a sheet come from.

use crate::error::{Error, Result};
use crate::model::Column;

/// A backend that yields the columns of named sheets.
///
/// Implemented by [`crate::xlsx::XlsxReader`] for real workbooks and by
/// [`MemorySource`] for data that is already in memory.
pub trait ColumnSource {
    /// Sheet names in document order.
    fn sheet_names(&self) -> Vec<String>;

    /// The columns of a sheet, left to right, each top to bottom.
    ///
    /// Returns [`Error::SheetNotFound`] for an unknown sheet name.
    fn columns(&self, sheet: &str) -> Result<Vec<Column>>;
}

/// In-memory workbook made of named sheets of columns.
///
/// # Example
///
/// ```
/// use unsheet::source::{ColumnSource, MemorySource};
///
/// let source = MemorySource::new()
///     .with_sheet("Sheet1", vec![vec!["Name".into(), "Alice".into()]]);
/// assert_eq!(source.sheet_names(), vec!["Sheet1".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<(String, Vec<Column>)>,
}

impl MemorySource {
    /// Create a source with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, columns: Vec<Column>) -> Self {
        self.sheets.push((name.into(), columns));
        self
    }
}

impl ColumnSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn columns(&self, sheet: &str) -> Result<Vec<Column>> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, columns)| columns.clone())
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))
    }
}
