//! Error types for the ZCTA county pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ZctaError>;

/// Main error type for the pipeline
///
/// Every variant is fatal for a run. Malformed coordinates in the ZIP-code
/// database are the one tolerated defect and never surface here.
#[derive(Error, Debug)]
pub enum ZctaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error in {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: u64,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Archive is empty: {0}")]
    EmptyArchive(String),
}

impl ZctaError {
    /// Create a parse error for a row of a named source
    pub fn parse(source_name: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
