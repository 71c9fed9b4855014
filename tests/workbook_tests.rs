//! Workbook reading tests against real .xlsx files
//!
//! Fixtures are generated with rust_xlsxwriter into temp directories.

use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWriter};
use sheetpeek::report::{summarize, WorkbookReport};
use sheetpeek::{list_sheets, load_sheet, CellValue, InspectError, SheetSource, Workbook};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Products (3 rows), Numbers (100 rows), Blank (empty), HeaderOnly (no rows)
fn write_sample_workbook(path: &Path) {
    let mut workbook = XlsxWriter::new();

    let products = workbook.add_worksheet();
    products.set_name("Products").unwrap();
    products.write_string(0, 0, "name").unwrap();
    products.write_string(0, 1, "price").unwrap();
    products.write_string(0, 2, "in_stock").unwrap();
    let rows = [("apple", 1.5, true), ("banana", 0.25, false), ("cherry", 4.0, true)];
    for (i, (name, price, stock)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        products.write_string(row, 0, *name).unwrap();
        products.write_number(row, 1, *price).unwrap();
        products.write_boolean(row, 2, *stock).unwrap();
    }

    let numbers = workbook.add_worksheet();
    numbers.set_name("Numbers").unwrap();
    numbers.write_string(0, 0, "n").unwrap();
    numbers.write_string(0, 1, "square").unwrap();
    for i in 0..100u32 {
        numbers.write_number(i + 1, 0, i as f64).unwrap();
        numbers.write_number(i + 1, 1, (i * i) as f64).unwrap();
    }

    let blank = workbook.add_worksheet();
    blank.set_name("Blank").unwrap();

    let header_only = workbook.add_worksheet();
    header_only.set_name("HeaderOnly").unwrap();
    header_only.write_string(0, 0, "a").unwrap();
    header_only.write_string(0, 1, "b").unwrap();

    workbook.save(path).unwrap();
}

fn sample_workbook() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sample.xlsx");
    write_sample_workbook(&path);
    (temp_dir, path)
}

/// Copy an .xlsx package, switching the workbook to the 1904 date system
fn rewrite_as_1904(src: &Path, dst: &Path) {
    let mut archive = ZipArchive::new(File::open(src).unwrap()).unwrap();
    let mut writer = ZipWriter::new(File::create(dst).unwrap());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();

        if name == "xl/workbook.xml" {
            let xml = String::from_utf8(contents).unwrap();
            assert!(xml.contains("<workbookPr"));
            contents = xml
                .replacen("<workbookPr", r#"<workbookPr date1904="1""#, 1)
                .into_bytes();
        }

        writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&contents).unwrap();
    }
    writer.finish().unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// SHEET LISTING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_list_sheets_in_workbook_order() {
    let (_dir, path) = sample_workbook();
    let names = list_sheets(&path).unwrap();
    assert_eq!(names, vec!["Products", "Numbers", "Blank", "HeaderOnly"]);
}

#[test]
fn test_list_sheets_nonexistent_file() {
    let result = list_sheets("/nonexistent/path/file.xlsx");
    assert!(matches!(result, Err(InspectError::Open { .. })));
}

#[test]
fn test_list_sheets_not_a_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.xlsx");
    std::fs::write(&path, "just some text, not a zip container").unwrap();

    let err = list_sheets(&path).unwrap_err();
    assert_eq!(err.kind(), sheetpeek::ErrorKind::Open);
}

// ═══════════════════════════════════════════════════════════════════════════
// SHEET LOADING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_load_sheet_columns_from_header_row() {
    let (_dir, path) = sample_workbook();
    let table = load_sheet(&path, "Products").unwrap();

    assert_eq!(table.columns, vec!["name", "price", "in_stock"]);
    assert_eq!(table.shape(), (3, 3));
    assert_eq!(table.value(0, "name"), Some(&CellValue::Text("apple".into())));
    assert_eq!(table.value(1, "price"), Some(&CellValue::Float(0.25)));
    assert_eq!(table.value(1, "in_stock"), Some(&CellValue::Bool(false)));
}

#[test]
fn test_load_sheet_missing_name_is_read_error() {
    let (_dir, path) = sample_workbook();
    let err = load_sheet(&path, "NoSuchSheet").unwrap_err();
    assert!(matches!(err, InspectError::SheetNotFound(ref s) if s == "NoSuchSheet"));
    assert_eq!(err.kind(), sheetpeek::ErrorKind::Read);
}

#[test]
fn test_load_blank_and_header_only_sheets() {
    let (_dir, path) = sample_workbook();
    let mut workbook = Workbook::open(&path).unwrap();

    let blank = workbook.load_sheet("Blank").unwrap();
    assert_eq!(blank.shape(), (0, 0));

    let header_only = workbook.load_sheet("HeaderOnly").unwrap();
    assert_eq!(header_only.shape(), (0, 2));
    assert_eq!(header_only.columns, vec!["a", "b"]);
}

#[test]
fn test_load_sheet_with_dates_and_duplicate_headers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dates.xlsx");

    let mut writer = XlsxWriter::new();
    let sheet = writer.add_worksheet();
    sheet.set_name("Log").unwrap();
    sheet.write_string(0, 0, "when").unwrap();
    sheet.write_string(0, 1, "value").unwrap();
    sheet.write_string(0, 2, "value").unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let date = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
    sheet
        .write_datetime_with_format(1, 0, &date, &date_format)
        .unwrap();
    sheet.write_number(1, 1, 10.0).unwrap();
    sheet.write_number(1, 2, 20.0).unwrap();
    writer.save(&path).unwrap();

    let table = load_sheet(&path, "Log").unwrap();
    assert_eq!(table.columns, vec!["when", "value", "value.1"]);
    assert_eq!(
        table.value(0, "when").unwrap().to_string(),
        "2024-01-15 00:00:00"
    );
}

#[test]
fn test_load_sheet_in_1904_date_system() {
    let temp_dir = TempDir::new().unwrap();
    let plain = temp_dir.path().join("plain.xlsx");
    let path = temp_dir.path().join("mac.xlsx");

    let mut writer = XlsxWriter::new();
    let sheet = writer.add_worksheet();
    sheet.set_name("Log").unwrap();
    sheet.write_string(0, 0, "when").unwrap();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    sheet
        .write_number_with_format(1, 0, 45306.0, &date_format)
        .unwrap();
    writer.save(&plain).unwrap();
    rewrite_as_1904(&plain, &path);

    let table = load_sheet(&plain, "Log").unwrap();
    assert_eq!(table.value(0, "when").unwrap().to_string(), "2024-01-15 00:00:00");

    let table = load_sheet(&path, "Log").unwrap();
    assert_eq!(table.value(0, "when").unwrap().to_string(), "2028-01-16 00:00:00");
}

#[test]
fn test_load_sheet_with_duration_cells() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("timesheet.xlsx");

    let mut writer = XlsxWriter::new();
    let sheet = writer.add_worksheet();
    sheet.set_name("Hours").unwrap();
    sheet.write_string(0, 0, "task").unwrap();
    sheet.write_string(0, 1, "spent").unwrap();
    let elapsed = Format::new().set_num_format("[h]:mm:ss");
    sheet.write_string(1, 0, "build").unwrap();
    sheet.write_number_with_format(1, 1, 1.5, &elapsed).unwrap();
    sheet.write_string(2, 0, "review").unwrap();
    sheet.write_number_with_format(2, 1, 0.25, &elapsed).unwrap();
    writer.save(&path).unwrap();

    let table = load_sheet(&path, "Hours").unwrap();
    assert!(matches!(table.value(0, "spent"), Some(CellValue::Duration(_))));

    let expected = "\
Shape: (2, 2)
Columns: ['task', 'spent']
First few rows:
     task            spent
0   build  1 days 12:00:00
1  review  0 days 06:00:00";
    assert_eq!(summarize(&table), expected);
}

#[test]
fn test_large_whole_numbers_render_exactly() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ids.xlsx");

    let mut writer = XlsxWriter::new();
    let sheet = writer.add_worksheet();
    sheet.set_name("Ids").unwrap();
    sheet.write_string(0, 0, "id").unwrap();
    sheet.write_number(1, 0, 1e17).unwrap();
    sheet.write_number(2, 0, 9_007_199_254_740_992.0).unwrap();
    writer.save(&path).unwrap();

    let table = load_sheet(&path, "Ids").unwrap();
    let summary = summarize(&table);
    assert!(summary.contains("0  100000000000000000"), "{}", summary);
    assert!(summary.contains("1    9007199254740992"), "{}", summary);
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_summarize_real_sheet() {
    let (_dir, path) = sample_workbook();
    let table = load_sheet(&path, "Products").unwrap();

    let expected = "\
Shape: (3, 3)
Columns: ['name', 'price', 'in_stock']
First few rows:
     name  price  in_stock
0   apple   1.50      True
1  banana   0.25     False
2  cherry   4.00      True";
    assert_eq!(summarize(&table), expected);
}

#[test]
fn test_summarize_long_sheet_shows_five_rows() {
    let (_dir, path) = sample_workbook();
    let table = load_sheet(&path, "Numbers").unwrap();
    let summary = summarize(&table);

    assert!(summary.starts_with("Shape: (100, 2)"));
    let preview: Vec<&str> = summary.lines().skip(4).collect();
    assert_eq!(preview.len(), 5);
    assert_eq!(preview[4], "4  4      16");
}

#[test]
fn test_workbook_report_counts() {
    let (_dir, path) = sample_workbook();
    let mut workbook = Workbook::open(&path).unwrap();
    let names = workbook.sheet_names();
    let report = WorkbookReport::build(&mut workbook, "sample.xlsx", &names, 5).unwrap();

    assert_eq!(report.sheet_count, 4);
    assert_eq!(report.sheets.len(), 4);
    assert_eq!(report.sheets[1].rows, 100);
    assert_eq!(report.sheets[1].head.len(), 5);
    assert_eq!(report.sheets[2].columns, 0);
}
