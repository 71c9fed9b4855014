//! Workbook access - calamine-backed sheet enumeration and loading

use crate::error::{InspectError, InspectResult};
use crate::types::{CellValue, SheetTable};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can name its sheets and load them as tables
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Load one sheet by name
    fn load_sheet(&mut self, name: &str) -> InspectResult<SheetTable>;
}

/// An open, read-only workbook. The file handle is released on drop.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook, detecting the format (xlsx, xlsm, xlsb, xls, ods)
    pub fn open<P: AsRef<Path>>(path: P) -> InspectResult<Self> {
        let path = path.as_ref().to_path_buf();
        let sheets = open_workbook_auto(&path).map_err(|source| InspectError::Open {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened workbook");
        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    fn load_sheet(&mut self, name: &str) -> InspectResult<SheetTable> {
        if !self.sheet_names().iter().any(|s| s == name) {
            return Err(InspectError::SheetNotFound(name.to_string()));
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|source| InspectError::Read {
                sheet: name.to_string(),
                source,
            })?;

        let table = table_from_range(name, &range);
        debug!(
            sheet = name,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded sheet"
        );
        Ok(table)
    }
}

/// Open the workbook at `path` and return its sheet names in file order
pub fn list_sheets<P: AsRef<Path>>(path: P) -> InspectResult<Vec<String>> {
    Ok(Workbook::open(path)?.sheet_names())
}

/// Open the workbook at `path` and load the named sheet
pub fn load_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> InspectResult<SheetTable> {
    Workbook::open(path)?.load_sheet(sheet_name)
}

/// Build a table from a worksheet range: first row is the header
pub fn table_from_range(name: &str, range: &Range<Data>) -> SheetTable {
    if range.is_empty() {
        return SheetTable::new(name, Vec::new());
    }

    let mut rows = range.rows();
    let header: Vec<Data> = rows.next().map(|r| r.to_vec()).unwrap_or_default();
    let mut table = SheetTable::new(name, column_names(&header));

    for row in rows {
        table.push_row(row.iter().map(convert_cell).collect());
    }

    table
}

/// Derive column names from a header row.
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
pub fn column_names(header: &[Data]) -> Vec<String> {
    let raw: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match convert_cell(cell) {
            CellValue::Empty => format!("Unnamed: {}", idx),
            CellValue::Text(s) if s.is_empty() => format!("Unnamed: {}", idx),
            other => other.to_string(),
        })
        .collect();

    dedupe_names(raw)
}

fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        taken.insert(candidate.clone());
        result.push(candidate);
    }

    result
}

/// Convert a calamine cell to a [`CellValue`]
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => match dt.as_duration() {
            Some(d) => CellValue::Duration(d),
            None => CellValue::Float(dt.as_f64()),
        },
        // Honors the workbook's 1900/1904 date system
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
