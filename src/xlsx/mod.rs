//! XLSX (Excel) column source.
//!
//! Reads Office Open XML workbooks (.xlsx, .xlsm) and yields each worksheet
//! as columns of text cells.
//!
//! # Example
//!
//! ```no_run
//! use unsheet::source::ColumnSource;
//! use unsheet::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("spreadsheet.xlsx")?;
//! for sheet in reader.sheet_names() {
//!     let columns = reader.columns(&sheet)?;
//!     println!("{}: {} columns", sheet, columns.len());
//! }
//! # Ok::<(), unsheet::Error>(())
//! ```

mod cell_ref;
mod parser;
mod shared_strings;

pub use cell_ref::CellRef;
pub use parser::XlsxReader;
