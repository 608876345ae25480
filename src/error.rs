//! Unified error types for tabella.
//!
//! Both extraction pipelines (Word documents and Excel workbooks) report
//! through this one error type, presenting a consistent API to users.
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for extraction operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path does not exist
    #[error("input path not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Required package part is missing
    #[error("missing package part: {0}")]
    MissingPart(String),

    /// File is not a readable Word document
    #[error("not a valid Word document: {0}")]
    InvalidDocument(String),

    /// Workbook parsing error
    #[error("workbook error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// CSV serialization error
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
