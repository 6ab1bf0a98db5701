//! Error types for IFC Tree View.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },
}

/// Errors that can occur when turning a raw attribute value into text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The value points at an instance that is not in the model.
    #[error("reference to missing instance #{id}")]
    UnresolvedReference { id: u64 },
}

/// Errors that can occur when dumping trees to stdout.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Failed to write data to the output stream.
    #[error("failed to write data: {source}")]
    Write {
        #[from]
        source: std::io::Error,
    },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
