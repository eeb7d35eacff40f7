//! unsheet CLI - Excel worksheet conversion tool
//!
//! Reads an `.xlsx` workbook from a file or stdin and writes its columns as
//! JSON, a Rust literal, CSV, or column statistics.

mod logger;

use clap::{ArgGroup, Parser};
use colored::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use unsheet::xlsx::XlsxReader;
use unsheet::{ConvertOptions, Error, JsonFormat, OutputFormat, RunContext};

/// Excel worksheet conversion to JSON, Rust literals and CSV
#[derive(Parser, Debug)]
#[command(
    name = "unsheet",
    author = "iyulab",
    version,
    about = "Convert Excel worksheets to JSON, Rust literals or CSV",
    long_about = "unsheet - Excel worksheet conversion tool.\n\n\
                  Reads each sheet as columns of text. By default row 0 holds the column\n\
                  names and each sheet becomes a name -> values mapping. Without an output\n\
                  format only statistics are printed."
)]
#[command(group(ArgGroup::new("format").args(["json", "literal", "csv"])))]
struct Cli {
    /// Process all sheets (default: only the first one)
    #[arg(long)]
    all: bool,

    /// Only process the sheet with this name
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Columns have no header row
    #[arg(long, visible_alias = "notitles")]
    no_headers: bool,

    /// Drop the header row from the output
    #[arg(long, visible_alias = "striptitles")]
    strip_headers: bool,

    /// Output each sheet as a list of columns
    #[arg(long)]
    table: bool,

    /// Print column statistics instead of a table
    #[arg(long)]
    stats: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Output a Rust literal
    #[arg(long, visible_alias = "rust")]
    literal: bool,

    /// Output CSV (first sheet only)
    #[arg(long)]
    csv: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// CSV field delimiter
    #[arg(long, value_name = "CHAR", default_value_t = ',')]
    delimiter: char,

    /// Input workbook (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more detail to stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else if self.literal {
            Some(OutputFormat::Literal)
        } else if self.csv {
            Some(OutputFormat::Csv)
        } else {
            None
        }
    }

    fn options(&self) -> Result<ConvertOptions, Error> {
        let mut options = ConvertOptions::new()
            .with_all_sheets(self.all)
            .with_headers(!self.no_headers)
            .with_strip_headers(self.strip_headers)
            .with_matrix(self.table)
            .with_statistics(self.stats)
            .with_delimiter(self.delimiter)?;

        if let Some(name) = &self.sheet {
            options = options.with_sheet(name.as_str());
        }
        if let Some(format) = self.format() {
            options = options.with_format(format);
        }
        if self.pretty {
            options = options.with_json_format(JsonFormat::Pretty);
        }
        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options()?;
    let data = read_input(cli.input.as_ref())?;

    let reader = XlsxReader::from_bytes(data)?;
    let mut run = RunContext::new(options);
    let tables = run.collect(&reader)?;
    eprintln!("{}", run.statistics());

    let output = run.render(&tables)?;
    write_output(cli.output.as_ref(), &output)?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>, Error> {
    match path {
        Some(p) => fs::read(p).map_err(|e| Error::file("open", p, e)),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Error> {
    match path {
        Some(p) => {
            let mut file = fs::File::create(p).map_err(|e| Error::file("create", p, e))?;
            file.write_all(content.as_bytes())
                .and_then(|_| file.flush())
                .map_err(|e| Error::file("write", p, e))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
