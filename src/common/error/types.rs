//! Unified error type for the timetable pipeline.
use thiserror::Error;

/// Main error type for timetable operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The .xlsx container could not be read as a ZIP archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Package part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Worksheet name not present in the workbook
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// Malformed A1-style cell reference
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, Error>;
