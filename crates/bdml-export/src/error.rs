//! Error types for trajectory export.

use thiserror::Error;

/// Errors that can occur while exporting a trajectory.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A trajectory file could not be parsed.
    #[error("trajectory parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing into the in-memory document failed.
    #[error("document formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// The source has no snapshot for the requested frame.
    #[error("no snapshot recorded for frame {0}")]
    MissingFrame(usize),
}

/// Result type for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
