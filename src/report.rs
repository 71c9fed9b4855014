//! Sheet summaries: shape, column list, and a tabular preview of the head rows

use crate::error::InspectResult;
use crate::types::{format_float, CellValue, SheetTable};
use crate::workbook::SheetSource;
use serde::Serialize;

/// Rows shown in a preview unless configured otherwise
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Summary of a sheet with the default preview length
pub fn summarize(table: &SheetTable) -> String {
    summarize_with(table, DEFAULT_HEAD_ROWS)
}

/// Summary of a sheet previewing at most `head_rows` rows
pub fn summarize_with(table: &SheetTable, head_rows: usize) -> String {
    let (rows, cols) = table.shape();
    format!(
        "Shape: ({}, {})\nColumns: {}\nFirst few rows:\n{}",
        rows,
        cols,
        format_name_list(&table.columns),
        render_head(table, head_rows)
    )
}

/// Render names as a bracketed, quoted list: `['a', 'b']`
pub fn format_name_list<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| quote(n.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

//==============================================================================
// Head table rendering
//==============================================================================

/// How numbers in a column are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every cell is an integral number
    Integer,
    /// Every non-empty cell is numeric; some are fractional or blank
    Float,
    /// Anything else: cells render independently
    Mixed,
}

/// Classify a column from all of its data cells
pub fn column_kind<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> ColumnKind {
    let mut numeric = 0usize;
    let mut fractional = false;
    let mut blank = false;

    for cell in cells {
        match cell {
            CellValue::Empty => blank = true,
            CellValue::Int(_) | CellValue::Float(_) => {
                numeric += 1;
                if !cell.is_integral() {
                    fractional = true;
                }
            }
            _ => return ColumnKind::Mixed,
        }
    }

    match (numeric, fractional || blank) {
        (0, _) => ColumnKind::Mixed,
        (_, false) => ColumnKind::Integer,
        (_, true) => ColumnKind::Float,
    }
}

/// Decimals needed to show `value` (shortest form, at most 6)
fn decimals_needed(value: f64) -> usize {
    let text = format_float(value);
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}

fn render_column(cells: &[&CellValue], kind: ColumnKind) -> Vec<String> {
    match kind {
        ColumnKind::Integer => cells
            .iter()
            .map(|c| match c {
                CellValue::Int(i) => i.to_string(),
                CellValue::Float(v) => format!("{:.0}", v),
                other => other.to_string(),
            })
            .collect(),
        ColumnKind::Float => {
            let decimals = cells
                .iter()
                .filter_map(|c| c.as_f64())
                .map(decimals_needed)
                .max()
                .unwrap_or(1)
                .clamp(1, 6);
            cells
                .iter()
                .map(|c| match c.as_f64() {
                    Some(v) => format!("{:.*}", decimals, v),
                    None => c.to_string(),
                })
                .collect()
        }
        ColumnKind::Mixed => cells.iter().map(|c| c.to_string()).collect(),
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Render the first `n` rows as an aligned text table with a row index
pub fn render_head(table: &SheetTable, n: usize) -> String {
    let head = table.head(n);
    if head.is_empty() {
        return format!(
            "Empty DataFrame\nColumns: [{}]\nIndex: []",
            table.columns.join(", ")
        );
    }

    let labels: Vec<String> = (0..head.len()).map(|i| i.to_string()).collect();
    let index_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    // Render column by column, then stitch rows back together
    let mut rendered: Vec<(usize, Vec<String>)> = Vec::with_capacity(table.column_count());
    for (col, name) in table.columns.iter().enumerate() {
        let kind = column_kind(table.column_values(col));
        let cells: Vec<&CellValue> = head
            .iter()
            .map(|row| row.get(col).unwrap_or(&EMPTY_CELL))
            .collect();
        let values = render_column(&cells, kind);
        let width = values
            .iter()
            .map(|v| v.chars().count())
            .chain(std::iter::once(name.chars().count()))
            .max()
            .unwrap_or(0);
        rendered.push((width, values));
    }

    let mut lines = Vec::with_capacity(head.len() + 1);

    let mut header = " ".repeat(index_width);
    for (name, (width, _)) in table.columns.iter().zip(&rendered) {
        header.push_str(&format!("  {:>width$}", name, width = *width));
    }
    lines.push(header);

    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("{:<width$}", label, width = index_width);
        for (width, values) in &rendered {
            line.push_str(&format!("  {:>width$}", values[row], width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

//==============================================================================
// JSON report
//==============================================================================

/// Machine-readable summary of one sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub head: Vec<Vec<CellValue>>,
}

impl SheetReport {
    pub fn from_table(table: &SheetTable, head_rows: usize) -> Self {
        let (rows, columns) = table.shape();
        Self {
            name: table.name.clone(),
            rows,
            columns,
            column_names: table.columns.clone(),
            head: table.head(head_rows).to_vec(),
        }
    }
}

/// Machine-readable summary of a whole workbook
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookReport {
    pub file: String,
    pub sheet_count: usize,
    pub sheet_names: Vec<String>,
    pub sheets: Vec<SheetReport>,
}

impl WorkbookReport {
    /// Load every sheet in `selected` (in order) and summarize it
    pub fn build<S: SheetSource>(
        source: &mut S,
        file: impl Into<String>,
        selected: &[String],
        head_rows: usize,
    ) -> InspectResult<Self> {
        let sheet_names = source.sheet_names();
        let mut sheets = Vec::with_capacity(selected.len());
        for name in selected {
            let table = source.load_sheet(name)?;
            sheets.push(SheetReport::from_table(&table, head_rows));
        }

        Ok(Self {
            file: file.into(),
            sheet_count: sheet_names.len(),
            sheet_names,
            sheets,
        })
    }
}
