//! Error types for tabrenderlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building data containers or rendering them
#[derive(Error, Debug)]
pub enum RenderError {
    /// No formatter registered for the requested renderer/format pair
    #[error("no '{format}' formatter registered for the {renderer} renderer")]
    FormatNotFound { renderer: String, format: String },

    /// A formatter or renderer needs an option the caller did not supply
    #[error("the '{format}' formatter requires the '{option}' option")]
    MissingOption { option: String, format: String },

    /// Row/column shape mismatch or wrong data kind
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// Column name not present in the table
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Column name already present in the table
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTML template evaluation failed
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PDF document assembly failed
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Failed to write the rendered artifact to the requested file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rendered output is not valid UTF-8 (e.g. PDF read as text)
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
