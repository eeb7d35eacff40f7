//! The conversion pipeline: source → shape → (transpose) → text.

use crate::error::{Error, Result};
use crate::model::{Book, MatrixTable};
use crate::options::{ConvertOptions, OutputFormat, OutputMode};
use crate::render::{to_csv, to_json, to_literal};
use crate::shape::{ShapeBuilder, Tables};
use crate::source::ColumnSource;
use crate::stats::{render_notes, Statistics};
use crate::transpose::transpose;

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Text for the primary output
    pub output: String,
    /// Counters for the diagnostic line
    pub statistics: Statistics,
    /// Mode the run used
    pub mode: OutputMode,
}

/// State of one conversion run.
///
/// Holds the options, the output mode resolved from them and the counters
/// accumulated while sheets are read. Create one per run.
///
/// # Example
///
/// ```
/// use unsheet::{ConvertOptions, OutputFormat, RunContext};
/// use unsheet::source::MemorySource;
///
/// let source = MemorySource::new().with_sheet(
///     "Sheet1",
///     vec![vec!["Name".into(), "Alice".into()]],
/// );
/// let mut run = RunContext::new(ConvertOptions::new().with_format(OutputFormat::Json));
/// let tables = run.collect(&source)?;
/// eprintln!("{}", run.statistics());
/// assert_eq!(run.render(&tables)?, "{\"Sheet1\":{\"Name\":[\"Alice\"]}}\n");
/// # Ok::<(), unsheet::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RunContext {
    options: ConvertOptions,
    mode: OutputMode,
    stats: Statistics,
}

impl RunContext {
    /// Start a run.
    pub fn new(options: ConvertOptions) -> Self {
        let mode = options.mode();
        Self {
            options,
            mode,
            stats: Statistics::default(),
        }
    }

    /// The output mode of this run.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// The options of this run.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Counters accumulated so far.
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Read the sheets in scope and build their tables.
    ///
    /// Sheets are visited in document order. With a sheet name only that
    /// sheet is in scope; without `all_sheets` the run stops after the first
    /// sheet in scope.
    pub fn collect<S: ColumnSource + ?Sized>(&mut self, source: &S) -> Result<Tables> {
        let mut builder = ShapeBuilder::new(self.mode, self.options.has_headers);
        let wanted = self.options.sheet.clone();

        for name in source.sheet_names() {
            if wanted.as_deref().is_some_and(|w| w != name) {
                continue;
            }

            log::debug!("processing sheet '{}' as {:?}", name, self.mode);
            let columns = source.columns(&name)?;
            builder.add_sheet(&name, columns, &mut self.stats)?;

            if !self.options.all_sheets {
                break;
            }
        }

        Ok(builder.finish())
    }

    /// Render collected tables to the configured output format.
    ///
    /// Fails when no sheet was processed: the requested sheet does not exist,
    /// or the workbook has no sheets.
    pub fn render(&self, tables: &Tables) -> Result<String> {
        if self.stats.sheets == 0 {
            return Err(match &self.options.sheet {
                Some(name) => Error::SheetNotFound(name.clone()),
                None => Error::NoSheets,
            });
        }

        match (tables, self.options.format) {
            (Tables::Statistics(notes), _) => Ok(render_notes(notes)),
            (_, None) => Ok(String::new()),
            (Tables::Mapping(book), Some(OutputFormat::Json)) => {
                to_json(book, self.options.json_format)
            }
            (Tables::Mapping(book), Some(OutputFormat::Literal)) => Ok(to_literal(book)),
            (Tables::Mapping(_), Some(OutputFormat::Csv)) => Err(Error::InvalidOption(
                "CSV output needs the matrix shape".to_string(),
            )),
            (Tables::Matrix(book), Some(OutputFormat::Csv)) => self.render_csv(book),
            (Tables::Matrix(book), Some(format)) => {
                let stripped;
                let book = if self.options.strips_headers() {
                    stripped = book.map(MatrixTable::without_headers);
                    &stripped
                } else {
                    book
                };
                match format {
                    OutputFormat::Literal => Ok(to_literal(book)),
                    _ => to_json(book, self.options.json_format),
                }
            }
        }
    }

    /// Transpose the first processed sheet and write it as CSV.
    fn render_csv(&self, book: &Book<MatrixTable>) -> Result<String> {
        let Some((sheet, table)) = book.first() else {
            return Ok(String::new());
        };
        if book.len() > 1 {
            log::warn!(
                "CSV output holds a single sheet; writing '{}' and ignoring {} more",
                sheet,
                book.len() - 1
            );
        }

        let grid = transpose(table, self.options.strips_headers());
        log::debug!(
            "sheet '{}' transposed to {} rows x {} columns",
            sheet,
            grid.height(),
            grid.width()
        );
        to_csv(&grid, self.options.delimiter)
    }
}

/// Run a whole conversion on a column source.
pub fn convert<S: ColumnSource + ?Sized>(
    source: &S,
    options: ConvertOptions,
) -> Result<Conversion> {
    let mut run = RunContext::new(options);
    let tables = run.collect(source)?;
    let output = run.render(&tables)?;
    Ok(Conversion {
        output,
        statistics: run.stats,
        mode: run.mode,
    })
}
