//! sheetpeek - quick textual previews of spreadsheet workbooks
//!
//! Opens a workbook, lists its sheets, and prints each sheet's shape,
//! column names, and first rows.
//!
//! # Features
//!
//! - Any format calamine detects: xlsx, xlsm, xlsb, xls, ods
//! - Header-row column naming with blank and duplicate handling
//! - Aligned head-row previews with a row index
//! - JSON report output
//!
//! # Example
//!
//! ```no_run
//! use sheetpeek::report::summarize;
//! use sheetpeek::workbook::{SheetSource, Workbook};
//!
//! let mut workbook = Workbook::open("Reference data/Reference file.xlsx")?;
//! for name in workbook.sheet_names() {
//!     let table = workbook.load_sheet(&name)?;
//!     println!("{}", summarize(&table));
//! }
//! # Ok::<(), sheetpeek::error::InspectError>(())
//! ```

pub mod cli;
pub mod error;
pub mod report;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use error::{ErrorKind, InspectError, InspectResult};
pub use report::{summarize, summarize_with};
pub use types::{CellValue, SheetTable};
pub use workbook::{list_sheets, load_sheet, SheetSource, Workbook};
