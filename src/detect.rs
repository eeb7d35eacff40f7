//! Workbook format detection.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for an ordinary workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for a macro-enabled workbook part.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Content types of Office packages that are not workbooks.
const OTHER_OFFICE_TYPES: [(&str, &str); 2] = [
    ("wordprocessingml.document.main+xml", "Word document"),
    ("presentationml.presentation.main+xml", "PowerPoint presentation"),
];

/// Detected workbook flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Macro-enabled Excel workbook (.xlsm)
    Xlsm,
}

impl WorkbookFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            WorkbookFormat::Xlsx => "xlsx",
            WorkbookFormat::Xlsm => "xlsm",
        }
    }
}

impl std::fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkbookFormat::Xlsx => write!(f, "Excel Workbook"),
            WorkbookFormat::Xlsm => write!(f, "Excel Macro-Enabled Workbook"),
        }
    }
}

/// Check the magic bytes of a candidate workbook.
pub fn is_zip(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Detect the workbook format of an opened package from `[Content_Types].xml`.
pub fn detect_format(container: &OoxmlContainer) -> Result<WorkbookFormat> {
    let content_types = container.read_xml("[Content_Types].xml")?;

    if content_types.contains(XLSX_CONTENT_TYPE) {
        return Ok(WorkbookFormat::Xlsx);
    }
    if content_types.contains(XLSM_CONTENT_TYPE) {
        return Ok(WorkbookFormat::Xlsm);
    }

    let kind = OTHER_OFFICE_TYPES
        .iter()
        .find(|(marker, _)| content_types.contains(marker))
        .map(|(_, name)| *name)
        .unwrap_or("package without a workbook part");
    Err(Error::UnsupportedFormat(kind.to_string()))
}

/// Open a package from bytes, making sure it holds a workbook.
pub fn open_workbook_package(data: Vec<u8>) -> Result<(OoxmlContainer, WorkbookFormat)> {
    if !is_zip(&data) {
        return Err(Error::UnknownFormat);
    }
    let container = OoxmlContainer::from_bytes(data)?;
    let format = detect_format(&container)?;
    Ok((container, format))
}
