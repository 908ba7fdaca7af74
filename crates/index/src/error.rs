use std::path::PathBuf;

use thiserror::Error;

/// Result type for index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// The source data does not match the documentation index shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Format error{}: {message}", at_record(.record))]
pub struct FormatError {
    /// Position of the offending record in `docs`, when the failure is record-local
    pub record: Option<usize>,
    pub message: String,
}

impl FormatError {
    /// Error that concerns the document as a whole
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            record: None,
            message: message.into(),
        }
    }

    /// Error tied to one record of the `docs` array
    pub fn record(index: usize, message: impl Into<String>) -> Self {
        Self {
            record: Some(index),
            message: message.into(),
        }
    }
}

fn at_record(record: &Option<usize>) -> String {
    record.map_or_else(String::new, |index| format!(" in record {index}"))
}

/// Errors that can occur while loading an index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read index file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// Create an error for an index file that could not be read
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Check whether the failure came from malformed data rather than I/O
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
