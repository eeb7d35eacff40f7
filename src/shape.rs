//! Shape builder: arranges columns into mapping or matrix tables.

use crate::error::{Error, Result};
use crate::model::{Book, Column, MappingTable, MatrixTable};
use crate::options::OutputMode;
use crate::stats::{ColumnNote, Statistics};

/// Everything collected for the sheets of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tables {
    /// Header-keyed tables per sheet
    Mapping(Book<MappingTable>),
    /// Column lists per sheet
    Matrix(Book<MatrixTable>),
    /// Descriptions of the columns with a header
    Statistics(Vec<ColumnNote>),
}

/// Builds the table shape selected by the output mode, sheet by sheet.
#[derive(Debug)]
pub struct ShapeBuilder {
    has_headers: bool,
    tables: Tables,
}

impl ShapeBuilder {
    /// Start an empty collection for the given mode.
    pub fn new(mode: OutputMode, has_headers: bool) -> Self {
        let tables = match mode {
            OutputMode::Mapping => Tables::Mapping(Book::new()),
            OutputMode::Matrix => Tables::Matrix(Book::new()),
            OutputMode::Statistics => Tables::Statistics(Vec::new()),
        };
        Self {
            has_headers,
            tables,
        }
    }

    /// Add the columns of one sheet, counting them in `stats`.
    pub fn add_sheet(
        &mut self,
        sheet: &str,
        columns: Vec<Column>,
        stats: &mut Statistics,
    ) -> Result<()> {
        stats.record_sheet();
        match &mut self.tables {
            Tables::Mapping(book) => {
                let table = build_mapping(sheet, columns, stats)?;
                book.insert(sheet, table);
            }
            Tables::Matrix(book) => {
                book.insert(sheet, build_matrix(columns, stats));
            }
            Tables::Statistics(notes) => {
                for column in &columns {
                    let index = stats.record_column(column.len());
                    if self.has_headers {
                        notes.extend(ColumnNote::describe(column, index));
                    }
                }
            }
        }
        Ok(())
    }

    /// The tables collected so far.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Finish building.
    pub fn finish(self) -> Tables {
        self.tables
    }
}

/// Build a header-keyed table from the columns of a sheet.
///
/// A column with only a header maps to no values. A column without any cell
/// has no header to use as a key and fails with [`Error::EmptyColumn`].
pub fn build_mapping(
    sheet: &str,
    columns: Vec<Column>,
    stats: &mut Statistics,
) -> Result<MappingTable> {
    let mut table = MappingTable::new();
    for column in columns {
        let index = stats.record_column(column.len());
        let mut cells = column.into_iter();
        let header = cells.next().ok_or_else(|| Error::EmptyColumn {
            sheet: sheet.to_string(),
            column: index,
        })?;
        table.insert(header, cells.collect());
        log::trace!("sheet '{}' col #{}: mapped", sheet, index);
    }
    Ok(table)
}

/// Build a matrix table holding every column verbatim.
pub fn build_matrix(columns: Vec<Column>, stats: &mut Statistics) -> MatrixTable {
    let mut table = MatrixTable::new();
    for column in columns {
        stats.record_column(column.len());
        table.push(column);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(cells: &[&str]) -> Column {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn people() -> Vec<Column> {
        vec![col(&["Name", "Alice", "Bob"]), col(&["Age", "30", "25"])]
    }

    #[test]
    fn test_mapping_excludes_header() {
        let mut stats = Statistics::default();
        let table = build_mapping("Sheet1", people(), &mut stats).unwrap();

        assert_eq!(table.headers(), vec!["Name", "Age"]);
        assert_eq!(table.get("Name").unwrap(), &col(&["Alice", "Bob"])[..]);
        assert_eq!(table.get("Age").unwrap(), &col(&["30", "25"])[..]);
        assert_eq!(stats.columns, 2);
        assert_eq!(stats.elements, 6);
    }

    #[test]
    fn test_mapping_header_only_column() {
        let mut stats = Statistics::default();
        let table = build_mapping("Sheet1", vec![col(&["Name"])], &mut stats).unwrap();
        assert_eq!(table.get("Name").map(|v| v.len()), Some(0));
    }

    #[test]
    fn test_mapping_empty_column_fails() {
        let mut stats = Statistics::default();
        stats.record_column(4);
        let err = build_mapping("Data", vec![col(&["A", "1"]), Vec::new()], &mut stats)
            .unwrap_err();

        match err {
            Error::EmptyColumn { sheet, column } => {
                assert_eq!(sheet, "Data");
                // run-wide index: one column was counted before this sheet
                assert_eq!(column, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_matrix_is_verbatim() {
        let columns = vec![col(&["A", "1", "2"]), Vec::new(), col(&["C"])];
        let mut stats = Statistics::default();
        let table = build_matrix(columns.clone(), &mut stats);

        assert_eq!(table.columns(), &columns[..]);
        assert_eq!(stats.columns, 3);
        assert_eq!(stats.elements, 4);
        assert_eq!(stats.rows, 3);
    }

    #[test]
    fn test_builder_collects_sheets() {
        let mut stats = Statistics::default();
        let mut builder = ShapeBuilder::new(OutputMode::Matrix, true);
        builder.add_sheet("One", people(), &mut stats).unwrap();
        builder.add_sheet("Two", vec![col(&["X"])], &mut stats).unwrap();

        assert_eq!(stats.sheets, 2);
        assert_eq!(stats.columns, 3);
        match builder.finish() {
            Tables::Matrix(book) => {
                assert_eq!(book.sheet_names(), vec!["One", "Two"]);
                assert_eq!(book.get("Two").unwrap().columns(), &[col(&["X"])]);
            }
            other => panic!("unexpected tables: {other:?}"),
        }
    }

    #[test]
    fn test_statistics_mode_notes() {
        let mut stats = Statistics::default();
        let mut builder = ShapeBuilder::new(OutputMode::Statistics, true);
        let columns = vec![col(&["Name", "Alice"]), col(&[" ", "x"]), Vec::new(), col(&["Age"])];
        builder.add_sheet("Sheet1", columns, &mut stats).unwrap();

        let Tables::Statistics(notes) = builder.finish() else {
            panic!("expected statistics");
        };
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].name, "Name");
        assert_eq!(notes[1].name, "Age");
        assert_eq!(notes[1].index, 3);
        assert_eq!(stats.elements, 5);
    }

    #[test]
    fn test_statistics_mode_without_headers() {
        let mut stats = Statistics::default();
        let mut builder = ShapeBuilder::new(OutputMode::Statistics, false);
        builder.add_sheet("Sheet1", people(), &mut stats).unwrap();

        assert_eq!(builder.tables(), &Tables::Statistics(Vec::new()));
        assert_eq!(stats.columns, 2);
    }
}
