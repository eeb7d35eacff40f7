//! Delimited (CSV) renderer.

use crate::error::{Error, Result};
use crate::model::Grid;

/// Render a grid as delimited text, one record per row.
///
/// Fields containing the delimiter, a quote or a line break are quoted with
/// quotes doubled. Records end with `\n`.
pub fn to_csv(grid: &Grid, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in grid.rows() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(e.error().to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}
