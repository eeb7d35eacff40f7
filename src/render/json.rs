//! JSON renderer implementation.

use crate::error::Result;
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    #[default]
    Compact,
    /// Pretty-printed with 2-space indentation
    Pretty,
}

/// Serialize a table or book to JSON, followed by a newline.
///
/// Cells are always JSON strings; key and column order is kept.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let mut json = match format {
        JsonFormat::Compact => serde_json::to_string(value)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    json.push('\n');
    Ok(json)
}
