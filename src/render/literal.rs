//! Rust source literal renderer.
//!
//! Tables are written as nested `vec![...]` expressions of string literals,
//! e.g. `vec![("Sheet1", vec![("Name", vec!["Alice", "Bob"])])]`, which is
//! valid Rust for a `Vec<(&str, Vec<(&str, Vec<&str>)>)>`.

use crate::model::{Book, MappingTable, MatrixTable};
use std::fmt::Write;

/// Types that can be written as a Rust expression.
pub trait RustLiteral {
    /// Append the literal form of `self` to `out`.
    fn write_literal(&self, out: &mut String);
}

impl RustLiteral for str {
    fn write_literal(&self, out: &mut String) {
        // Debug formatting of str is a valid Rust string literal
        let _ = write!(out, "{:?}", self);
    }
}

impl RustLiteral for String {
    fn write_literal(&self, out: &mut String) {
        self.as_str().write_literal(out);
    }
}

impl<T: RustLiteral> RustLiteral for [T] {
    fn write_literal(&self, out: &mut String) {
        out.push_str("vec![");
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            item.write_literal(out);
        }
        out.push(']');
    }
}

impl<T: RustLiteral> RustLiteral for Vec<T> {
    fn write_literal(&self, out: &mut String) {
        self.as_slice().write_literal(out);
    }
}

impl RustLiteral for MatrixTable {
    fn write_literal(&self, out: &mut String) {
        self.columns().write_literal(out);
    }
}

impl RustLiteral for MappingTable {
    fn write_literal(&self, out: &mut String) {
        write_pairs(self.iter(), out);
    }
}

impl<T: RustLiteral> RustLiteral for Book<T> {
    fn write_literal(&self, out: &mut String) {
        write_pairs(self.iter(), out);
    }
}

fn write_pairs<'a, V: RustLiteral + ?Sized + 'a>(
    pairs: impl Iterator<Item = (&'a str, &'a V)>,
    out: &mut String,
) {
    out.push_str("vec![");
    for (i, (key, value)) in pairs.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        key.write_literal(out);
        out.push_str(", ");
        value.write_literal(out);
        out.push(')');
    }
    out.push(']');
}

/// Render a table or book as a Rust literal on one line.
pub fn to_literal<T: RustLiteral + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    value.write_literal(&mut out);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_book() {
        let mut table = MappingTable::new();
        table.insert("Name", vec!["Alice".to_string(), "Bob".to_string()]);
        table.insert("Age", Vec::new());
        let mut book = Book::new();
        book.insert("Sheet1", table);

        assert_eq!(
            to_literal(&book),
            "vec![(\"Sheet1\", vec![(\"Name\", vec![\"Alice\", \"Bob\"]), (\"Age\", vec![])])]\n"
        );
    }

    #[test]
    fn test_matrix_book() {
        let mut book = Book::new();
        book.insert(
            "S",
            MatrixTable::from(vec![vec!["A".to_string(), "1".to_string()], vec!["B".to_string()]]),
        );

        assert_eq!(
            to_literal(&book),
            "vec![(\"S\", vec![vec![\"A\", \"1\"], vec![\"B\"]])]\n"
        );
    }

    #[test]
    fn test_string_escaping() {
        let mut out = String::new();
        "say \"hi\"\n\\".write_literal(&mut out);
        assert_eq!(out, r#""say \"hi\"\n\\""#);
    }

    #[test]
    fn test_empty_book() {
        let book: Book<MatrixTable> = Book::new();
        assert_eq!(to_literal(&book), "vec![]\n");
    }
}
