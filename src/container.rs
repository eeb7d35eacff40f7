//! ZIP package access for Office Open XML workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Read-only view over the ZIP package of a workbook.
///
/// Parts are decompressed on demand; the archive itself stays in memory.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unsheet::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("book.xlsx")?;
    /// assert!(container.exists("xl/workbook.xml"));
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file("open", path, e))?;
        let mut data = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut data)
            .map_err(|e| Error::file("read", path, e))?;
        Self::from_bytes(data)
    }

    /// Create a package view from an in-memory archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as a string, decoding UTF-8 or UTF-16 content.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read the raw bytes of a part.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// List all part names in the archive.
    pub fn list_files(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }

    /// Resolve a relationship target against the part that declares it.
    ///
    /// Absolute targets (`/xl/worksheets/sheet1.xml`) drop the leading slash;
    /// relative targets are joined to the directory of `base`.
    pub fn resolve_path(base: &str, target: &str) -> String {
        if let Some(stripped) = target.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut parts: Vec<&str> = base.split('/').collect();
        parts.pop();
        for segment in target.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                s => parts.push(s),
            }
        }
        parts.join("/")
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}

/// Decode XML bytes that may be UTF-8 (with or without BOM) or UTF-16.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec())
            .map_err(|e| Error::InvalidData(format!("invalid UTF-8 in XML part: {}", e))),
        [0xFF, 0xFE, rest @ ..] => Ok(utf8_declaration(&decode_utf16(rest, u16::from_le_bytes)?)),
        [0xFE, 0xFF, rest @ ..] => Ok(utf8_declaration(&decode_utf16(rest, u16::from_be_bytes)?)),
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            // UTF-16 without BOM: ASCII markup leaves every other byte zero
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                Ok(utf8_declaration(&decode_utf16(bytes, u16::from_le_bytes)?))
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                Ok(utf8_declaration(&decode_utf16(bytes, u16::from_be_bytes)?))
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidData(format!("invalid UTF-16 in XML part: {}", e)))
}

/// Rewrite a UTF-16 encoding declaration once the content is already UTF-8,
/// otherwise quick-xml would try to decode it a second time.
fn utf8_declaration(content: &str) -> String {
    if let Some(end) = content.strip_prefix("<?xml").and_then(|_| content.find("?>")) {
        let (decl, rest) = content.split_at(end + 2);
        let decl = decl
            .replace("\"UTF-16\"", "\"UTF-8\"")
            .replace("'UTF-16'", "'UTF-8'")
            .replace("\"utf-16\"", "\"UTF-8\"")
            .replace("'utf-16'", "'UTF-8'");
        return format!("{}{}", decl, rest);
    }
    content.to_string()
}
