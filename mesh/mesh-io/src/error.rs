//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
///
/// Every variant is fatal to the load that produced it; no partial mesh is
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Malformed line in a text format.
    #[error("line {line}: {message} (at '{token}')")]
    Format {
        /// 1-based line number.
        line: usize,
        /// The offending field or keyword.
        token: String,
        /// What was wrong with it.
        message: String,
    },

    /// Binary buffer shorter than its declared contents.
    #[error("truncated binary data: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Byte count implied by the header.
        expected: u64,
        /// Byte count actually available.
        actual: u64,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Format` error for the given line and token.
    #[must_use]
    pub fn format(line: usize, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            token: token.into(),
            message: message.into(),
        }
    }

    /// Map an open/read failure on `path`, turning `NotFound` into
    /// [`IoError::FileNotFound`].
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
