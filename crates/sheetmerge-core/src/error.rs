//! Error types for ingest, parsing and the upload store

use thiserror::Error;

/// Result type for upload store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Reasons an upload request is rejected before anything is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Request carries no `file` part
    #[error("No file part")]
    MissingFilePart,

    /// `file` part present but with an empty filename
    #[error("No file selected")]
    EmptyFilename,

    /// Filename would escape the upload directory
    #[error("Invalid filename")]
    InvalidFilename(String),
}

/// Errors reading a stored file as a table
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// Workbook contains no worksheets
    #[error("Workbook has no worksheet")]
    NoWorksheet,

    /// File has no header row
    #[error("No columns to parse from file")]
    MissingHeader,

    /// A data row has more fields than the header
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Errors from the upload directory store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Upload directory error: {0}")]
    Io(#[from] std::io::Error),
}
