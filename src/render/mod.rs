//! Output rendering for converted tables.
//!
//! Books of mapping or matrix tables render to JSON or to a Rust literal;
//! a transposed [`Grid`](crate::model::Grid) renders to CSV.
//!
//! # Example
//!
//! ```
//! use unsheet::model::{Book, MappingTable};
//! use unsheet::render::{to_json, to_literal, JsonFormat};
//!
//! let mut table = MappingTable::new();
//! table.insert("Name", vec!["Alice".to_string()]);
//! let mut book = Book::new();
//! book.insert("Sheet1", table);
//!
//! assert_eq!(to_json(&book, JsonFormat::Compact)?, "{\"Sheet1\":{\"Name\":[\"Alice\"]}}\n");
//! assert_eq!(to_literal(&book), "vec![(\"Sheet1\", vec![(\"Name\", vec![\"Alice\"])])]\n");
//! # Ok::<(), unsheet::Error>(())
//! ```

mod delimited;
mod json;
mod literal;

pub use delimited::to_csv;
pub use json::{to_json, JsonFormat};
pub use literal::{to_literal, RustLiteral};
