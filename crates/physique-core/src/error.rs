//! Error types for staging and analysis

use std::path::PathBuf;

use thiserror::Error;

/// Result type for scratch directory operations
pub type ScratchResult<T> = Result<T, ScratchError>;

/// Errors that can occur while staging an upload
#[derive(Debug, Error)]
pub enum ScratchError {
    /// The scratch directory could not be created or read
    #[error("Scratch directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to a staged file after it was finished
    #[error("Staged file {0} is already finished")]
    Finished(uuid::Uuid),

    /// Any other filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur in an analyzer
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The analyzer (model, service) cannot be reached
    #[error("Analyzer unavailable: {0}")]
    Unavailable(String),

    /// The uploaded file is not an image the analyzer accepts
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
