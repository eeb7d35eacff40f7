//! In-memory table shapes produced by a conversion run.
//!
//! Sources yield columns; the shape builder arranges them into a
//! [`MappingTable`] or a [`MatrixTable`] per sheet, collected in a [`Book`].
//! CSV output additionally needs the row-major [`Grid`].

mod book;
mod grid;
mod table;

pub use book::Book;
pub use grid::Grid;
pub use table::{Column, MappingTable, MatrixTable};
