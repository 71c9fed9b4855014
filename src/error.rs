use std::path::PathBuf;
use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Worksheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Failed to read sheet '{sheet}': {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse failure classes used for exit statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The workbook could not be opened or recognized
    Open,
    /// A sheet was missing or could not be read as a table
    Read,
    /// Writing the report failed
    Output,
}

impl InspectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InspectError::Open { .. } => ErrorKind::Open,
            InspectError::SheetNotFound(_) | InspectError::Read { .. } => ErrorKind::Read,
            InspectError::Io(_) | InspectError::Json(_) => ErrorKind::Output,
        }
    }
}

impl ErrorKind {
    /// Process exit status used by `--strict`
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorKind::Output => 1,
            ErrorKind::Open => 2,
            ErrorKind::Read => 3,
        }
    }
}
