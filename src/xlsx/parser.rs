//! XLSX workbook reader.

use crate::container::OoxmlContainer;
use crate::detect::{open_workbook_package, WorkbookFormat};
use crate::error::{Error, Result};
use crate::model::Column;
use crate::source::ColumnSource;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::cell_ref::{CellRef, MAX_COLUMNS, MAX_ROWS};
use super::shared_strings::SharedStrings;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Reader for XLSX (Excel) workbooks.
///
/// Worksheets are parsed lazily, one per [`ColumnSource::columns`] call.
pub struct XlsxReader {
    container: OoxmlContainer,
    format: WorkbookFormat,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl XlsxReader {
    /// Open a workbook file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| Error::file("open", path, e))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| Error::file("read", path, e))?;
        Self::from_bytes(data)
    }

    /// Read a whole workbook from a stream, e.g. standard input.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a reader from workbook bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let (container, format) = open_workbook_package(data)?;

        let shared_strings = if container.exists(SHARED_STRINGS_PART) {
            SharedStrings::parse(&container.read_xml(SHARED_STRINGS_PART)?)?
        } else {
            SharedStrings::default()
        };
        let relationships = Self::parse_workbook_rels(&container)?;
        let sheets = Self::parse_workbook(&container)?;

        log::debug!(
            "opened {} with {} sheets and {} shared strings",
            format,
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            container,
            format,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// The detected workbook flavour.
    pub fn format(&self) -> WorkbookFormat {
        self.format
    }

    /// Number of sheets in the workbook.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Map relationship ids to worksheet part targets.
    fn parse_workbook_rels(container: &OoxmlContainer) -> Result<HashMap<String, String>> {
        let mut rels = HashMap::new();
        let xml = container.read_xml(WORKBOOK_RELS_PART)?;
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attribute(&e, b"Id");
                    let target = attribute(&e, b"Target");
                    if let (Some(id), Some(target)) = (id, target) {
                        rels.insert(id, target);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read sheet names and relationship ids from workbook.xml.
    fn parse_workbook(container: &OoxmlContainer) -> Result<Vec<SheetInfo>> {
        let mut sheets = Vec::new();
        let xml = container.read_xml(WORKBOOK_PART)?;
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = attribute(&e, b"name").unwrap_or_default();
                    // r:id, whatever the namespace prefix is called
                    let rel_id = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.local_name().as_ref() == b"id" && a.key.prefix().is_some())
                        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
                        .unwrap_or_default();

                    if !name.is_empty() {
                        sheets.push(SheetInfo { name, rel_id });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Locate the worksheet part of a sheet.
    fn sheet_path(&self, sheet: &SheetInfo) -> Result<String> {
        let target = self.relationships.get(&sheet.rel_id).ok_or_else(|| Error::Sheet {
            sheet: sheet.name.clone(),
            reason: format!("no relationship for id '{}'", sheet.rel_id),
        })?;
        Ok(OoxmlContainer::resolve_path(WORKBOOK_PART, target))
    }

    /// Parse worksheet XML into columns.
    ///
    /// Every column up to the rightmost cell is returned. A column is as tall
    /// as its lowest cell; gaps above it become empty strings, and a column
    /// without any cell element is empty.
    fn parse_sheet(&self, xml: &str) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut in_sheet_data = false;
        let mut in_value = false;
        let mut phonetic_depth = 0usize;
        let mut row_idx = 0usize;
        let mut next_col = 0usize;
        let mut rows_seen = 0usize;
        let mut current: Option<PendingCell> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"sheetData" => in_sheet_data = true,
                    b"row" if in_sheet_data => {
                        row_idx = row_position(e, rows_seen)?;
                        rows_seen = row_idx + 1;
                        next_col = 0;
                    }
                    b"c" if in_sheet_data => {
                        let cell = PendingCell::start(e, row_idx, next_col)?;
                        next_col = cell.position.col + 1;
                        current = Some(cell);
                    }
                    b"rPh" if current.is_some() => phonetic_depth += 1,
                    b"v" | b"t" if current.is_some() && phonetic_depth == 0 => in_value = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" if in_sheet_data => {
                        row_idx = row_position(e, rows_seen)?;
                        rows_seen = row_idx + 1;
                    }
                    b"c" if in_sheet_data => {
                        let cell = PendingCell::start(e, row_idx, next_col)?;
                        next_col = cell.position.col + 1;
                        place(&mut columns, cell.position, String::new());
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_value => {
                    let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    if let Some(cell) = current.as_mut() {
                        cell.raw.push_str(&text);
                    }
                }
                Ok(Event::CData(ref e)) if in_value => {
                    if let Some(cell) = current.as_mut() {
                        cell.raw.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"sheetData" => in_sheet_data = false,
                    b"c" => {
                        if let Some(cell) = current.take() {
                            let value = self.resolve_cell_value(&cell.raw, cell.cell_type.as_deref());
                            place(&mut columns, cell.position, value);
                        }
                        in_value = false;
                        phonetic_depth = 0;
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(columns)
    }

    /// Turn the stored value of a cell into its text.
    fn resolve_cell_value(&self, value: &str, cell_type: Option<&str>) -> String {
        match cell_type {
            Some("s") => match value.trim().parse::<usize>() {
                Ok(idx) => match self.shared_strings.get(idx) {
                    Some(s) => s.to_string(),
                    None => {
                        log::warn!("shared string index {} out of range", idx);
                        String::new()
                    }
                },
                Err(_) => value.to_string(),
            },
            Some("b") => match value.trim() {
                "1" => "TRUE".to_string(),
                "0" => "FALSE".to_string(),
                other => other.to_string(),
            },
            // Numbers, dates, formula results and error literals are kept as
            // stored; cells are text only.
            _ => value.to_string(),
        }
    }
}

/// A `<c>` element whose value is still being read.
struct PendingCell {
    position: CellRef,
    cell_type: Option<String>,
    raw: String,
}

impl PendingCell {
    fn start(e: &BytesStart, row: usize, next_col: usize) -> Result<Self> {
        let position = match attribute(e, b"r") {
            Some(r) => CellRef::parse(&r)
                .ok_or_else(|| Error::InvalidData(format!("invalid cell reference '{}'", r)))?,
            None if next_col < MAX_COLUMNS => CellRef::new(next_col, row),
            None => {
                return Err(Error::InvalidData(format!(
                    "row {} has more than {} cells",
                    row + 1,
                    MAX_COLUMNS
                )))
            }
        };
        Ok(Self {
            position,
            cell_type: attribute(e, b"t"),
            raw: String::new(),
        })
    }
}

/// Zero-based index of a `<row>`, from its `r` attribute or its position.
///
/// Rows beyond the worksheet limit are rejected.
fn row_position(e: &BytesStart, rows_seen: usize) -> Result<usize> {
    match attribute(e, b"r") {
        Some(r) => r
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_ROWS).contains(n))
            .map(|n| n - 1)
            .ok_or_else(|| Error::InvalidData(format!("invalid row number '{}'", r))),
        None if rows_seen < MAX_ROWS => Ok(rows_seen),
        None => Err(Error::InvalidData(format!(
            "sheet has more than {} rows",
            MAX_ROWS
        ))),
    }
}

/// Store a value at its position, growing the columns as needed.
fn place(columns: &mut Vec<Column>, position: CellRef, value: String) {
    if columns.len() <= position.col {
        columns.resize_with(position.col + 1, Vec::new);
    }
    let column = &mut columns[position.col];
    if column.len() <= position.row {
        column.resize(position.row + 1, String::new());
    }
    column[position.row] = value;
}

/// Value of an unprefixed attribute.
fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| match a.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}

impl ColumnSource for XlsxReader {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn columns(&self, sheet: &str) -> Result<Vec<Column>> {
        let info = self
            .sheets
            .iter()
            .find(|s| s.name == sheet)
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))?;

        let path = self.sheet_path(info)?;
        let wrap = |e: Error| Error::Sheet {
            sheet: sheet.to_string(),
            reason: e.to_string(),
        };
        let xml = self.container.read_xml(&path).map_err(wrap)?;
        let columns = self.parse_sheet(&xml).map_err(wrap)?;
        log::debug!("sheet '{}' ({}): {} columns", sheet, path, columns.len());
        Ok(columns)
    }
}

impl std::fmt::Debug for XlsxReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxReader")
            .field("format", &self.format)
            .field("sheets", &self.sheet_names())
            .finish()
    }
}
