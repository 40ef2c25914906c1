//! Unified error types for tmu

use thiserror::Error;

/// Unified error type for all tmu operations
///
/// Parsing, catalog generation and projection are total and never produce
/// one of these. Errors only come from the edges: files, serialization and
/// configuration.
#[derive(Error, Debug)]
pub enum TmuError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Presentation errors
    #[error("Unknown export: {0}")]
    UnknownExport(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using TmuError
pub type Result<T> = std::result::Result<T, TmuError>;
