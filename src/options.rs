//! Conversion options and output mode selection.

use crate::error::{Error, Result};
use crate::render::JsonFormat;

/// Textual format of the primary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON
    Json,
    /// Rust source literal
    Literal,
    /// Delimited text (CSV); always a single sheet in matrix shape
    Csv,
}

/// What a run builds from the columns it reads.
///
/// Resolved once per run by [`ConvertOptions::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Header → data cells per sheet
    Mapping,
    /// Full columns per sheet
    Matrix,
    /// No table; column descriptions only
    Statistics,
}

/// Options for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Process every sheet instead of stopping after the first one in scope
    pub all_sheets: bool,

    /// Only process this sheet (None = first sheet)
    pub sheet: Option<String>,

    /// Row 0 of every column is a header
    pub has_headers: bool,

    /// Drop the header row from matrix output
    pub strip_headers: bool,

    /// Build the matrix shape even for JSON/literal output
    pub force_matrix: bool,

    /// Describe columns instead of emitting a table
    pub statistics: bool,

    /// Primary output format (None = statistics only)
    pub format: Option<OutputFormat>,

    /// JSON layout
    pub json_format: JsonFormat,

    /// Field delimiter for CSV output
    pub delimiter: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            all_sheets: false,
            sheet: None,
            has_headers: true,
            strip_headers: false,
            force_matrix: false,
            statistics: false,
            format: None,
            json_format: JsonFormat::Compact,
            delimiter: b',',
        }
    }
}

impl ConvertOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process all sheets.
    pub fn with_all_sheets(mut self, all: bool) -> Self {
        self.all_sheets = all;
        self
    }

    /// Select a sheet by name; an empty name means the first sheet.
    pub fn with_sheet(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.sheet = (!name.is_empty()).then_some(name);
        self
    }

    /// Declare whether row 0 holds column names.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Drop the header row from the output.
    pub fn with_strip_headers(mut self, strip: bool) -> Self {
        self.strip_headers = strip;
        self
    }

    /// Force the matrix shape.
    pub fn with_matrix(mut self, matrix: bool) -> Self {
        self.force_matrix = matrix;
        self
    }

    /// Request statistics mode.
    pub fn with_statistics(mut self, statistics: bool) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the primary output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set the CSV delimiter. Must be a single ASCII character.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\r' | '\n') {
            return Err(Error::InvalidOption(format!(
                "delimiter must be a single ASCII character other than a quote or line break, got {:?}",
                delimiter
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Whether header cells are dropped from matrix output.
    ///
    /// Without headers there is nothing to strip.
    pub fn strips_headers(&self) -> bool {
        self.strip_headers && self.has_headers
    }

    /// Resolve the output mode.
    ///
    /// Statistics wins when requested or when no output format is set.
    /// Otherwise any matrix-forcing option (`--table`, `--strip-headers`,
    /// `--no-headers`, CSV output) selects the matrix shape, and mapping is
    /// the default.
    pub fn mode(&self) -> OutputMode {
        if self.statistics || self.format.is_none() {
            return OutputMode::Statistics;
        }
        let matrix = self.force_matrix
            || self.strip_headers
            || !self.has_headers
            || self.format == Some(OutputFormat::Csv);
        if matrix {
            OutputMode::Matrix
        } else {
            OutputMode::Mapping
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert!(opts.has_headers);
        assert!(!opts.all_sheets);
        assert_eq!(opts.sheet, None);
        assert_eq!(opts.delimiter, b',');
        assert_eq!(opts.mode(), OutputMode::Statistics);
    }

    #[test]
    fn test_mode_selection() {
        let json = ConvertOptions::new().with_format(OutputFormat::Json);
        assert_eq!(json.mode(), OutputMode::Mapping);
        assert_eq!(json.clone().with_matrix(true).mode(), OutputMode::Matrix);
        assert_eq!(json.clone().with_strip_headers(true).mode(), OutputMode::Matrix);
        assert_eq!(json.clone().with_headers(false).mode(), OutputMode::Matrix);
        assert_eq!(json.clone().with_statistics(true).mode(), OutputMode::Statistics);

        let csv = ConvertOptions::new().with_format(OutputFormat::Csv);
        assert_eq!(csv.mode(), OutputMode::Matrix);

        let literal = ConvertOptions::new().with_format(OutputFormat::Literal);
        assert_eq!(literal.mode(), OutputMode::Mapping);
    }

    #[test]
    fn test_matrix_flags_without_format_are_statistics() {
        let opts = ConvertOptions::new().with_matrix(true).with_strip_headers(true);
        assert_eq!(opts.mode(), OutputMode::Statistics);
    }

    #[test]
    fn test_empty_sheet_name_means_first() {
        assert_eq!(ConvertOptions::new().with_sheet("").sheet, None);
        assert_eq!(
            ConvertOptions::new().with_sheet("Data").sheet.as_deref(),
            Some("Data")
        );
    }

    #[test]
    fn test_strip_requires_headers() {
        let opts = ConvertOptions::new().with_strip_headers(true);
        assert!(opts.strips_headers());
        assert!(!opts.with_headers(false).strips_headers());
    }

    #[test]
    fn test_delimiter_validation() {
        assert_eq!(ConvertOptions::new().with_delimiter(';').unwrap().delimiter, b';');
        assert_eq!(ConvertOptions::new().with_delimiter('\t').unwrap().delimiter, b'\t');
        assert!(ConvertOptions::new().with_delimiter('§').is_err());
        assert!(ConvertOptions::new().with_delimiter('"').is_err());
    }
}
