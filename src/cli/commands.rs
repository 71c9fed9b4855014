use crate::error::{InspectError, InspectResult};
use crate::report::{format_name_list, summarize_with, WorkbookReport, DEFAULT_HEAD_ROWS};
use crate::workbook::{SheetSource, Workbook};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error};

/// Workbook inspected when no path is given
pub const DEFAULT_WORKBOOK: &str = "Reference data/Reference file.xlsx";

/// Prefix of the single line printed when inspection fails
pub const ERROR_PREFIX: &str = "Error reading Excel file";

/// Options for one inspection run
#[derive(Debug, Clone, PartialEq)]
pub struct InspectOptions {
    /// Workbook to open
    pub file: PathBuf,
    /// Preview rows per sheet
    pub head_rows: usize,
    /// Sheets to inspect, in order (empty = every sheet)
    pub sheets: Vec<String>,
    /// Emit one JSON document instead of text
    pub json: bool,
    /// Report failures through the exit status
    pub strict: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_WORKBOOK),
            head_rows: DEFAULT_HEAD_ROWS,
            sheets: Vec::new(),
            json: false,
            strict: false,
        }
    }
}

impl InspectOptions {
    /// Sheets to process given the workbook's own sheet list
    fn selected_sheets(&self, available: &[String]) -> Vec<String> {
        if self.sheets.is_empty() {
            available.to_vec()
        } else {
            self.sheets.clone()
        }
    }
}

/// Execute an inspection run, catching any failure at this boundary.
///
/// Returns the process exit status: always 0 unless `strict` is set.
pub fn run<W: Write>(options: &InspectOptions, out: &mut W) -> u8 {
    match inspect_file(options, out) {
        Ok(()) => 0,
        Err(e) => {
            error!(file = %options.file.display(), kind = ?e.kind(), "{e}");
            let message = format!("{}: {}", ERROR_PREFIX, e);
            // Nothing left to report to if stdout itself is gone
            let _ = writeln!(out, "{}", message.red());
            let _ = out.flush();
            if options.strict {
                e.kind().exit_status()
            } else {
                0
            }
        }
    }
}

/// Open the configured workbook and write its report to `out`
pub fn inspect_file<W: Write>(options: &InspectOptions, out: &mut W) -> InspectResult<()> {
    let mut workbook = Workbook::open(&options.file)?;

    if options.json {
        let file = workbook.path().display().to_string();
        write_json(&mut workbook, &file, options, out)
    } else {
        inspect(&mut workbook, options, out)
    }
}

/// Print the sheet list, then a summary of every selected sheet.
///
/// Stops at the first sheet that fails to load.
pub fn inspect<S: SheetSource, W: Write>(
    source: &mut S,
    options: &InspectOptions,
    out: &mut W,
) -> InspectResult<()> {
    let names = source.sheet_names();
    writeln!(
        out,
        "Found {} sheets: {}",
        names.len(),
        format_name_list(&names)
    )?;

    for name in options.selected_sheets(&names) {
        writeln!(out, "\n\n{}", format!("=== SHEET: {} ===", name).bold().cyan())?;
        let table = source.load_sheet(&name)?;
        writeln!(out, "{}", summarize_with(&table, options.head_rows))?;
    }

    out.flush()?;
    Ok(())
}

/// Build the full report first so a failure never leaves partial JSON behind
pub fn write_json<S: SheetSource, W: Write>(
    source: &mut S,
    file: &str,
    options: &InspectOptions,
    out: &mut W,
) -> InspectResult<()> {
    let selected = options.selected_sheets(&source.sheet_names());
    let report = WorkbookReport::build(source, file, &selected, options.head_rows)?;
    debug!(sheets = report.sheets.len(), "built JSON report");

    serde_json::to_writer_pretty(&mut *out, &report).map_err(InspectError::Json)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
