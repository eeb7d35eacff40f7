//! # unsheet
//!
//! Convert Excel worksheets to JSON, Rust literals, CSV, or column statistics.
//!
//! Each sheet is read as columns of text cells. A run arranges those columns
//! into one of two shapes:
//!
//! - **mapping**: column header → the cells below it
//! - **matrix**: the list of columns, every cell included
//!
//! and renders the shape as JSON or as a Rust literal. CSV output transposes
//! the matrix of one sheet into rows first.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unsheet::{convert_file, ConvertOptions, OutputFormat};
//!
//! let options = ConvertOptions::new().with_format(OutputFormat::Json);
//! let result = convert_file("people.xlsx", options)?;
//! eprintln!("{}", result.statistics);
//! print!("{}", result.output);
//! # Ok::<(), unsheet::Error>(())
//! ```
//!
//! ## Step by step
//!
//! ```no_run
//! use unsheet::{ConvertOptions, OutputFormat, RunContext};
//! use unsheet::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("people.xlsx")?;
//! let options = ConvertOptions::new()
//!     .with_format(OutputFormat::Csv)
//!     .with_strip_headers(true);
//!
//! let mut run = RunContext::new(options);
//! let tables = run.collect(&reader)?;
//! eprintln!("{}", run.statistics());
//! print!("{}", run.render(&tables)?);
//! # Ok::<(), unsheet::Error>(())
//! ```
//!
//! ## Features
//!
//! - `xlsx` (default): Excel workbook reader

#[cfg(feature = "xlsx")]
pub mod container;
#[cfg(feature = "xlsx")]
pub mod detect;
#[cfg(feature = "xlsx")]
pub mod xlsx;

pub mod convert;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod shape;
pub mod source;
pub mod stats;
pub mod transpose;

// Re-exports
pub use convert::{convert, Conversion, RunContext};
pub use error::{Error, Result};
pub use model::{Book, Column, Grid, MappingTable, MatrixTable};
pub use options::{ConvertOptions, OutputFormat, OutputMode};
pub use render::JsonFormat;
pub use shape::Tables;
pub use source::{ColumnSource, MemorySource};
pub use stats::{ColumnNote, Statistics};

#[cfg(feature = "xlsx")]
use std::path::Path;

/// Convert a workbook file.
///
/// # Example
///
/// ```no_run
/// use unsheet::{convert_file, ConvertOptions, OutputFormat};
///
/// let options = ConvertOptions::new()
///     .with_format(OutputFormat::Literal)
///     .with_all_sheets(true);
/// let result = convert_file("book.xlsx", options)?;
/// println!("{}", result.output);
/// # Ok::<(), unsheet::Error>(())
/// ```
#[cfg(feature = "xlsx")]
pub fn convert_file(path: impl AsRef<Path>, options: ConvertOptions) -> Result<Conversion> {
    let reader = xlsx::XlsxReader::open(path)?;
    convert(&reader, options)
}

/// Convert a workbook held in memory.
///
/// # Example
///
/// ```no_run
/// use unsheet::{convert_bytes, ConvertOptions};
///
/// let data = std::fs::read("book.xlsx")?;
/// let result = convert_bytes(data, ConvertOptions::new())?;
/// print!("{}", result.output);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "xlsx")]
pub fn convert_bytes(data: Vec<u8>, options: ConvertOptions) -> Result<Conversion> {
    let reader = xlsx::XlsxReader::from_bytes(data)?;
    convert(&reader, options)
}
