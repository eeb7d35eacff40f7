//! Column-major to row-major transposition for row-oriented output.

use crate::model::{Grid, MatrixTable};

/// Transpose the columns of one sheet into a rectangular grid.
///
/// The grid is as wide as the table has columns and as tall as its tallest
/// column. Cells below the end of a shorter column stay empty strings; ragged
/// input is not an error. With `strip_headers`, row 0 of every column is
/// dropped and the grid is one row shorter.
///
/// # Example
///
/// ```
/// use unsheet::model::MatrixTable;
/// use unsheet::transpose::transpose;
///
/// let table = MatrixTable::from(vec![
///     vec!["Name".to_string(), "Alice".to_string()],
///     vec!["Age".to_string()],
/// ]);
/// let grid = transpose(&table, false);
/// assert_eq!(grid.rows(), &[vec!["Name", "Age"], vec!["Alice", ""]]);
/// ```
pub fn transpose(table: &MatrixTable, strip_headers: bool) -> Grid {
    let skip = usize::from(strip_headers);
    let width = table.len();

    // first pass: the tallest column decides the height
    let height = table.max_column_len().saturating_sub(skip);
    let mut grid = Grid::blank(height, width);

    // second pass: copy what each column actually has
    for (c, column) in table.columns().iter().enumerate() {
        for (r, cell) in column.iter().enumerate().skip(skip) {
            let row = r - skip;
            if row < height && c < width {
                grid.set(row, c, cell.as_str());
            }
        }
    }

    grid
}
