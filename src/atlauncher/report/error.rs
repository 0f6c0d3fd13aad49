use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads an instance descriptor or emits the report workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading the descriptor.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the instance descriptor is not valid JSON or does not have
    /// the expected shape.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the user provides a path that does not exist.
    #[error("File not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Raised when a report layout cannot be laid out on a single sheet.
    #[error("invalid report layout: {0}")]
    InvalidLayout(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
