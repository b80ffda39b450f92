//! Error types for the preview extractor.

use thiserror::Error;

/// Errors that can occur while decoding a workbook or projecting its columns
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unrecognized spreadsheet format: {0}")]
    Decode(String),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
