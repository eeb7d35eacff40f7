//! Error types for the unsheet library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a workbook.
///
/// Every variant is fatal for the run that produced it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error on a standard stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error on a named file.
    #[error("could not {action} {}: {source}", path.display())]
    File {
        /// What was being attempted ("open", "create", ...)
        action: &'static str,
        /// The file involved
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The input is not a ZIP package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The package is recognized but is not a spreadsheet.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// A worksheet could not be read.
    #[error("could not get columns for sheet {sheet}: {reason}")]
    Sheet {
        /// Sheet name
        sheet: String,
        /// What went wrong
        reason: String,
    },

    /// A column without any cell cannot contribute a mapping key.
    #[error("can't build a mapping from a column with no header or values; col #{column}, sheet: {sheet}")]
    EmptyColumn {
        /// Sheet name
        sheet: String,
        /// Run-wide column index
        column: usize,
    },

    /// The requested sheet does not exist in the workbook.
    #[error("could not find sheet by name of: {0}")]
    SheetNotFound(String),

    /// The workbook has no sheets at all.
    #[error("workbook contains no sheets")]
    NoSheets,

    /// Structured output could not be encoded.
    #[error("could not encode output: {0}")]
    Serialize(String),

    /// Delimited output could not be written.
    #[error("could not write output CSV: {0}")]
    Csv(String),

    /// A configuration value that cannot be honored.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Wrap an I/O error with the file operation that caused it.
    pub fn file(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::File {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}
