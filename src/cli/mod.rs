//! CLI command handlers

pub mod commands;

pub use commands::{
    inspect, inspect_file, run, write_json, InspectOptions, DEFAULT_WORKBOOK, ERROR_PREFIX,
};
