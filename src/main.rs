use anyhow::Context;
use clap::Parser;
use sheetpeek::cli::{self, InspectOptions, DEFAULT_WORKBOOK};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetpeek")]
#[command(about = "Preview the sheets of a spreadsheet workbook")]
#[command(long_about = "sheetpeek - quick look inside a spreadsheet workbook

Lists every sheet, then prints each sheet's shape, column names, and
first rows. The first row of each sheet is used as the header.

FORMATS:
  xlsx, xlsm, xlsb, xls, ods

EXAMPLES:
  sheetpeek                              # Inspect the default workbook
  sheetpeek sales.xlsx                   # Inspect another file
  sheetpeek sales.xlsx -n 10             # Show 10 rows per sheet
  sheetpeek sales.xlsx -s Q1 -s Q2       # Only sheets Q1 and Q2
  sheetpeek sales.xlsx --json            # Machine-readable report

Errors are printed as 'Error reading Excel file: ...' and exit with
status 0 unless --strict is given.")]
#[command(version)]
struct Cli {
    /// Path to the workbook
    #[arg(default_value = DEFAULT_WORKBOOK, env = "SHEETPEEK_FILE")]
    file: PathBuf,

    /// Number of rows to preview per sheet
    #[arg(short = 'n', long = "rows", default_value = "5", env = "SHEETPEEK_ROWS")]
    rows: usize,

    /// Only inspect this sheet (repeatable, processed in the given order)
    #[arg(short, long = "sheet")]
    sheets: Vec<String>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Exit non-zero on failure (2 = open error, 3 = sheet read error)
    #[arg(long)]
    strict: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default = if verbose {
        "sheetpeek=debug"
    } else {
        "sheetpeek=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()),
        )
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(args.verbose)?;

    let options = InspectOptions {
        file: args.file,
        head_rows: args.rows,
        sheets: args.sheets,
        json: args.json,
        strict: args.strict,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let status = cli::run(&options, &mut out);
    out.flush().context("failed to flush stdout")?;

    Ok(ExitCode::from(status))
}
