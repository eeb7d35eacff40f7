//! Per-sheet collection of tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tables keyed by sheet name, in the order the sheets were processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book<T> {
    sheets: IndexMap<String, T>,
}

impl<T> Default for Book<T> {
    fn default() -> Self {
        Self {
            sheets: IndexMap::new(),
        }
    }
}

impl<T> Book<T> {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the table of a sheet, replacing an earlier one of the same name.
    pub fn insert(&mut self, sheet: impl Into<String>, table: T) {
        self.sheets.insert(sheet.into(), table);
    }

    /// Get the table of a sheet.
    pub fn get(&self, sheet: &str) -> Option<&T> {
        self.sheets.get(sheet)
    }

    /// The first sheet that was processed.
    pub fn first(&self) -> Option<(&str, &T)> {
        self.sheets.first().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over sheet names and tables in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sheet names in processing order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(|k| k.as_str()).collect()
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if no sheet was collected.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Transform every table, keeping sheet order.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Book<U> {
        Book {
            sheets: self.sheets.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
        }
    }
}
