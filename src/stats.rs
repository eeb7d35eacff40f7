//! Sheet statistics.
//!
//! Counters are accumulated while columns are read and never influence the
//! tables being built.

use std::fmt;

/// Running totals over the sheets processed in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Sheets processed
    pub sheets: usize,
    /// Columns processed, across all sheets
    pub columns: usize,
    /// Cells processed, across all columns
    pub elements: usize,
    /// Length of the tallest column seen
    pub rows: usize,
}

impl Statistics {
    /// Count a sheet.
    pub fn record_sheet(&mut self) {
        self.sheets += 1;
    }

    /// Count a column of `cells` cells; returns its run-wide index.
    pub fn record_column(&mut self, cells: usize) -> usize {
        let index = self.columns;
        self.columns += 1;
        self.elements += cells;
        self.rows = self.rows.max(cells);
        index
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info: #sheets read: {} #cols: {} #elements: {} #nrows: {}",
            self.sheets, self.columns, self.elements, self.rows
        )
    }
}

/// Description of a column with a non-blank header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNote {
    /// Header text
    pub name: String,
    /// Run-wide column index
    pub index: usize,
    /// Number of cells, header included
    pub cells: usize,
}

impl ColumnNote {
    /// Describe a column, `None` when it has no usable header.
    pub fn describe(column: &[String], index: usize) -> Option<Self> {
        let header = column.first()?;
        if header.trim().is_empty() {
            return None;
        }
        Some(Self {
            name: header.clone(),
            index,
            cells: column.len(),
        })
    }
}

impl fmt::Display for ColumnNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column name: \"{}\" at col# {} with {} rows",
            self.name, self.index, self.cells
        )
    }
}

/// Render column notes one per line.
pub fn render_notes(notes: &[ColumnNote]) -> String {
    let mut out = String::new();
    for note in notes {
        out.push_str(&note.to_string());
        out.push('\n');
    }
    out
}
