use chrono::{Duration, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

//==============================================================================
// Cell values
//==============================================================================

/// A single cell as read from a worksheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank cell (rendered as `NaN` in previews, `null` in JSON)
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Cell formatted as elapsed time, e.g. `[h]:mm:ss`
    #[serde(serialize_with = "serialize_duration")]
    Duration(Duration),
    /// Excel error code such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric value of `Int` and `Float` cells
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// True for numbers without a fractional part
    pub fn is_integral(&self) -> bool {
        match self {
            CellValue::Int(_) => true,
            CellValue::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "NaN"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{}", format_float(*v)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Duration(d) => write!(f, "{}", format_duration(d)),
            CellValue::Error(code) => write!(f, "{code}"),
        }
    }
}

/// Format elapsed time as `<days> days HH:MM:SS`
pub fn format_duration(d: &Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.unsigned_abs();
    format!(
        "{}{} days {:02}:{:02}:{:02}",
        sign,
        secs / 86_400,
        secs % 86_400 / 3_600,
        secs % 3_600 / 60,
        secs % 60
    )
}

fn serialize_duration<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(d))
}

/// Format a number on its own: integral values without a decimal point,
/// everything else rounded to 6 decimals with trailing zeros removed
pub fn format_float(n: f64) -> String {
    if !n.is_finite() {
        return if n.is_nan() {
            "NaN".to_string()
        } else if n > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    if n.fract() == 0.0 {
        return if n == 0.0 {
            "0".to_string()
        } else {
            format!("{:.0}", n)
        };
    }
    let rounded = (n * 1e6).round() / 1e6;
    let text = format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

//==============================================================================
// Sheet data
//==============================================================================

/// One worksheet loaded as a table: a header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub columns: Vec<String>,
    /// Data rows; `push_row` keeps each one `columns.len()` cells wide.
    /// Rendering treats missing trailing cells as blank.
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`, header row excluded
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (fewer if the sheet is shorter)
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Cell at `row` under the column named `column`
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// All cells of one column, top to bottom
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(col))
    }
}
