//! End-to-end extraction from real .xlsx containers.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tabella::{ExtractOptions, RunConfig, run};
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Write a minimal single-sheet .xlsx container.
fn build_xlsx(dir: &Path, name: &str, defined_names: &str, sheet_data: &str) -> PathBuf {
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
  {defined_names}
</workbook>"#
    );
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
{sheet_data}
  </sheetData>
</worksheet>"#
    );

    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    for (part, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        writer.start_file(part, options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

fn text_cell(reference: &str, value: &str) -> String {
    format!(r#"<c r="{reference}" t="inlineStr"><is><t>{value}</t></is></c>"#)
}

fn blank_row(number: u32, columns: &[&str]) -> String {
    let cells: String = columns
        .iter()
        .map(|col| text_cell(&format!("{col}{number}"), ""))
        .collect();
    format!(r#"    <row r="{number}">{cells}</row>"#)
}

fn text_row(number: u32, values: &[(&str, &str)]) -> String {
    let cells: String = values
        .iter()
        .map(|(col, value)| text_cell(&format!("{col}{number}"), value))
        .collect();
    format!(r#"    <row r="{number}">{cells}</row>"#)
}

fn read_records(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn config(input: PathBuf, out: &Path) -> RunConfig {
    RunConfig {
        input,
        output_dir: Some(out.to_path_buf()),
        use_captions: true,
        named_ranges: false,
        extract: ExtractOptions {
            keep_header: true,
            ..ExtractOptions::default()
        },
    }
}

#[test]
fn leading_blank_rows_are_consumed_not_emitted() {
    let sheet_data = [
        blank_row(1, &["A", "B"]),
        blank_row(2, &["A", "B"]),
        blank_row(3, &["A", "B"]),
        text_row(4, &[("A", "alpha"), ("B", "beta")]),
        text_row(5, &[("A", "gamma"), ("B", "delta")]),
    ]
    .join("\n");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", "", &sheet_data);

    let summary = run(&config(input, &out)).unwrap();
    assert_eq!(summary.files, 1);

    let records = read_records(&out.join("book.xlsx").join("Sheet1.csv"));
    assert_eq!(
        records,
        vec![
            vec!["alpha".to_string(), "beta".to_string()],
            vec!["gamma".to_string(), "delta".to_string()],
        ]
    );
}

#[test]
fn blank_row_terminates_collection_early() {
    let sheet_data = [
        text_row(1, &[("A", "x"), ("B", "y")]),
        blank_row(2, &["A", "B"]),
        text_row(3, &[("A", "z"), ("B", "w")]),
    ]
    .join("\n");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", "", &sheet_data);

    run(&config(input, &out)).unwrap();

    let records = read_records(&out.join("book.xlsx").join("Sheet1.csv"));
    assert_eq!(records, vec![vec!["x".to_string(), "y".to_string()]]);
}

#[test]
fn skipping_the_header_drops_the_first_data_row() {
    let sheet_data = [
        text_row(1, &[("A", "header")]),
        text_row(2, &[("A", "data")]),
    ]
    .join("\n");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", "", &sheet_data);

    let mut config = config(input, &out);
    config.extract.keep_header = false;
    run(&config).unwrap();

    let records = read_records(&out.join("book.xlsx").join("Sheet1.csv"));
    assert_eq!(records, vec![vec!["data".to_string()]]);
}

#[test]
fn named_ranges_are_extracted_when_enabled() {
    let defined = r#"<definedNames><definedName name="Totals">Sheet1!$A$2:$B$3</definedName></definedNames>"#;
    let sheet_data = [
        text_row(1, &[("A", "h1"), ("B", "h2")]),
        text_row(2, &[("A", "a"), ("B", "b")]),
        text_row(3, &[("A", "c"), ("B", "d")]),
    ]
    .join("\n");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", defined, &sheet_data);

    let mut config = config(input, &out);
    config.named_ranges = true;
    run(&config).unwrap();

    let records = read_records(&out.join("book.xlsx").join("Totals.csv"));
    assert_eq!(
        records,
        vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]
    );
}

#[test]
fn single_cell_defined_name_yields_an_empty_file() {
    let defined =
        r#"<definedNames><definedName name="JustOne">Sheet1!$A$1</definedName></definedNames>"#;
    let sheet_data = text_row(1, &[("A", "x")]);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", defined, &sheet_data);

    let mut config = config(input, &out);
    config.named_ranges = true;
    run(&config).unwrap();

    let file = out.join("book.xlsx").join("JustOne.csv");
    assert!(file.is_file());
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
}

#[test]
fn named_ranges_are_ignored_by_default() {
    let defined = r#"<definedNames><definedName name="Totals">Sheet1!$A$1:$B$2</definedName></definedNames>"#;
    let sheet_data = text_row(1, &[("A", "x"), ("B", "y")]);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", defined, &sheet_data);

    run(&config(input, &out)).unwrap();

    assert!(!out.join("book.xlsx").join("Totals.csv").exists());
    assert!(out.join("book.xlsx").join("Sheet1.csv").is_file());
}

#[test]
fn numeric_cells_round_trip_through_csv() {
    let sheet_data = [
        format!(r#"    <row r="1">{}<c r="B1"><v>42</v></c><c r="C1"><v>2.5</v></c></row>"#, text_cell("A1", "n")),
    ]
    .join("\n");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let input = build_xlsx(dir.path(), "book.xlsx", "", &sheet_data);

    run(&config(input, &out)).unwrap();

    let records = read_records(&out.join("book.xlsx").join("Sheet1.csv"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][0], "n");
    assert_eq!(records[0][1], "42");
    assert_eq!(records[0][2], "2.5");
}
