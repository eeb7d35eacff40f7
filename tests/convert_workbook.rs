//! End-to-end conversion of real `.xlsx` packages built in memory.

use std::io::{Cursor, Write};
use unsheet::detect::WorkbookFormat;
use unsheet::xlsx::{CellRef, XlsxReader};
use unsheet::{
    convert, convert_bytes, convert_file, ColumnSource, ConvertOptions, Error, OutputFormat,
    OutputMode,
};
use zip::write::SimpleFileOptions;

const XLSX_MAIN: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Builds a minimal workbook. Text cells go to the shared string table,
/// numeric-looking cells are stored as numbers, empty cells are left out.
#[derive(Default)]
struct WorkbookBuilder {
    sheets: Vec<(String, Vec<Vec<String>>)>,
    strings: Vec<String>,
}

impl WorkbookBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self.sheets.push((name.to_string(), rows));
        self
    }

    fn string_index(&mut self, text: &str) -> usize {
        match self.strings.iter().position(|s| s == text) {
            Some(i) => i,
            None => {
                self.strings.push(text.to_string());
                self.strings.len() - 1
            }
        }
    }

    fn sheet_xml(&mut self, rows: &[Vec<String>]) -> String {
        let mut xml = String::from("<worksheet><sheetData>");
        for (r, row) in rows.iter().enumerate() {
            xml.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let reference = CellRef::new(c, r);
                if value.parse::<f64>().is_ok() {
                    xml.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", reference, value));
                } else {
                    let idx = self.string_index(value);
                    xml.push_str(&format!("<c r=\"{}\" t=\"s\"><v>{}</v></c>", reference, idx));
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        xml
    }

    fn build(mut self) -> Vec<u8> {
        let sheets = std::mem::take(&mut self.sheets);
        let mut parts = Vec::new();
        let mut entries = String::new();
        let mut rels = String::new();

        for (i, (name, rows)) in sheets.iter().enumerate() {
            let n = i + 1;
            entries.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                name, n, n
            ));
            rels.push_str(&format!(
                "<Relationship Id=\"rId{}\" Target=\"worksheets/sheet{}.xml\"/>",
                n, n
            ));
            parts.push((format!("xl/worksheets/sheet{}.xml", n), self.sheet_xml(rows)));
        }

        let strings: String = self
            .strings
            .iter()
            .map(|s| format!("<si><t>{}</t></si>", s))
            .collect();

        parts.push((
            "[Content_Types].xml".to_string(),
            format!(
                "<Types><Override PartName=\"/xl/workbook.xml\" ContentType=\"{}\"/></Types>",
                XLSX_MAIN
            ),
        ));
        parts.push((
            "xl/workbook.xml".to_string(),
            format!(
                "<workbook xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><sheets>{}</sheets></workbook>",
                entries
            ),
        ));
        parts.push((
            "xl/_rels/workbook.xml.rels".to_string(),
            format!("<Relationships>{}</Relationships>", rels),
        ));
        parts.push(("xl/sharedStrings.xml".to_string(), format!("<sst>{}</sst>", strings)));

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}

fn people() -> Vec<u8> {
    WorkbookBuilder::new()
        .sheet(
            "Sheet1",
            &[&["Name", "Age"], &["Alice", "30"], &["Bob", "25"]],
        )
        .sheet("Cities", &[&["City", "Country"], &["Paris", "France"]])
        .build()
}

#[test]
fn mapping_json_from_first_sheet() {
    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let result = convert_bytes(people(), options).unwrap();

    assert_eq!(result.mode, OutputMode::Mapping);
    assert_eq!(
        result.output,
        "{\"Sheet1\":{\"Name\":[\"Alice\",\"Bob\"],\"Age\":[\"30\",\"25\"]}}\n"
    );
    assert_eq!(
        result.statistics.to_string(),
        "info: #sheets read: 1 #cols: 2 #elements: 6 #nrows: 3"
    );
}

#[test]
fn matrix_csv_with_stripped_headers() {
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Csv)
        .with_strip_headers(true);
    let result = convert_bytes(people(), options).unwrap();

    assert_eq!(result.mode, OutputMode::Matrix);
    assert_eq!(result.output, "Alice,30\nBob,25\n");
}

#[test]
fn missing_sheet_is_an_error() {
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Json)
        .with_sheet("Nope");

    match convert_bytes(people(), options) {
        Err(Error::SheetNotFound(name)) => assert_eq!(name, "Nope"),
        other => panic!("expected SheetNotFound, got {:?}", other),
    }
}

#[test]
fn header_only_column_maps_to_empty_list() {
    let data = WorkbookBuilder::new()
        .sheet("Sheet1", &[&["Name"]])
        .build();
    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let result = convert_bytes(data, options).unwrap();

    assert_eq!(result.output, "{\"Sheet1\":{\"Name\":[]}}\n");
}

#[test]
fn all_sheets_in_document_order() {
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Literal)
        .with_all_sheets(true);
    let result = convert_bytes(people(), options).unwrap();

    assert_eq!(
        result.output,
        "vec![(\"Sheet1\", vec![(\"Name\", vec![\"Alice\", \"Bob\"]), (\"Age\", vec![\"30\", \"25\"])]), \
         (\"Cities\", vec![(\"City\", vec![\"Paris\"]), (\"Country\", vec![\"France\"])])]\n"
    );
    assert_eq!(result.statistics.sheets, 2);
    assert_eq!(result.statistics.rows, 3);
}

#[test]
fn named_sheet_as_csv() {
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Csv)
        .with_sheet("Cities")
        .with_delimiter(';')
        .unwrap();
    let result = convert_bytes(people(), options).unwrap();

    assert_eq!(result.output, "City;Country\nParis;France\n");
}

#[test]
fn ragged_sheet_pads_csv_rows() {
    let data = WorkbookBuilder::new()
        .sheet("Sheet1", &[&["A", "B"], &["1", ""], &["2", ""]])
        .build();
    let options = ConvertOptions::new().with_format(OutputFormat::Csv);
    let result = convert_bytes(data, options).unwrap();

    assert_eq!(result.output, "A,B\n1,\n2,\n");
}

#[test]
fn statistics_describe_columns() {
    let result = convert_bytes(people(), ConvertOptions::new()).unwrap();

    assert_eq!(result.mode, OutputMode::Statistics);
    assert_eq!(
        result.output,
        "Column name: \"Name\" at col# 0 with 3 rows\nColumn name: \"Age\" at col# 1 with 3 rows\n"
    );
}

#[test]
fn reader_from_stream() {
    let reader = XlsxReader::from_reader(Cursor::new(people())).unwrap();
    assert_eq!(reader.format(), WorkbookFormat::Xlsx);
    assert_eq!(reader.sheet_count(), 2);
    assert_eq!(reader.sheet_names(), vec!["Sheet1", "Cities"]);
    assert_eq!(reader.columns("Cities").unwrap()[1], vec!["Country", "France"]);

    let options = ConvertOptions::new()
        .with_format(OutputFormat::Json)
        .with_matrix(true);
    let result = convert(&reader, options).unwrap();
    assert_eq!(
        result.output,
        "{\"Sheet1\":[[\"Name\",\"Alice\",\"Bob\"],[\"Age\",\"30\",\"25\"]]}\n"
    );
}

#[test]
fn convert_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.xlsx");
    std::fs::write(&path, people()).unwrap();

    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let result = convert_file(&path, options).unwrap();
    assert!(result.output.starts_with("{\"Sheet1\":"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xlsx");

    let err = convert_file(&path, ConvertOptions::new()).unwrap_err();
    assert!(matches!(err, Error::File { action: "open", .. }));
    assert!(err.to_string().contains("absent.xlsx"));
}

#[test]
fn non_zip_input_is_rejected() {
    let err = convert_bytes(b"Name,Age\nAlice,30\n".to_vec(), ConvertOptions::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
}
