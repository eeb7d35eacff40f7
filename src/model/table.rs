//! Column-oriented table shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The cells of one sheet column, top to bottom.
pub type Column = Vec<String>;

/// Header-keyed table: one entry per source column, header cell excluded.
///
/// Entries keep column order. A repeated header keeps the position of its
/// first occurrence and the values of its last one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    columns: IndexMap<String, Vec<String>>,
}

impl MappingTable {
    /// Create an empty mapping table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the data cells of a column under its header.
    pub fn insert(&mut self, header: impl Into<String>, values: Vec<String>) {
        self.columns.insert(header.into(), values);
    }

    /// Get the data cells recorded for a header.
    pub fn get(&self, header: &str) -> Option<&[String]> {
        self.columns.get(header).map(|v| v.as_slice())
    }

    /// Iterate over headers and their data cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Headers in column order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Number of distinct headers.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Column-major table keeping every column's full cell sequence.
///
/// Columns may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixTable {
    columns: Vec<Column>,
}

impl MatrixTable {
    /// Create an empty matrix table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column verbatim.
    pub fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// All columns in source order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Length of the tallest column, 0 for an empty table.
    pub fn max_column_len(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Copy of the table with the header cell removed from every column.
    pub fn without_headers(&self) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|col| col.iter().skip(1).cloned().collect())
                .collect(),
        }
    }
}

impl From<Vec<Column>> for MatrixTable {
    fn from(columns: Vec<Column>) -> Self {
        Self { columns }
    }
}
