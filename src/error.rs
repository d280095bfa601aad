//! Unified error types for chatledger.
//!
//! Reconstruction itself never fails: malformed lines become
//! [`ParsingIssue`](crate::issue::ParsingIssue)s and unparseable timestamps
//! become `None`. The errors here cover everything around the engine:
//! reading files, decoding bytes, writing reports and looking up uploads.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::message::UploadId;

/// A specialized [`Result`] type for chatledger operations.
///
/// # Example
///
/// ```rust
/// use chatledger::error::Result;
/// use chatledger::parser::ParseResult;
///
/// fn my_function() -> Result<ParseResult> {
///     Ok(ParseResult::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, LedgerError>;

/// The error type for all chatledger operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing a report)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid UTF-8 text.
    ///
    /// The whole document is rejected; no partial result is produced.
    #[error("UTF-8 decoding error in {context}: {source}")]
    Utf8 {
        /// Where the bytes came from (file name, upload, ...)
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested output format is unknown or unavailable.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A store was asked about an upload it does not hold.
    #[error("Upload {0} not found")]
    UploadNotFound(UploadId),

    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
}

impl From<std::string::FromUtf8Error> for LedgerError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        LedgerError::Utf8 {
            context: "output conversion".to_string(),
            source: err.utf8_error(),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl LedgerError {
    /// Creates a UTF-8 decoding error with context.
    pub fn utf8(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        LedgerError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        LedgerError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a read error for a path.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LedgerError::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, LedgerError::Io(_) | LedgerError::Read { .. })
    }

    /// Returns `true` if the input could not be decoded.
    pub fn is_utf8(&self) -> bool {
        matches!(self, LedgerError::Utf8 { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, LedgerError::InvalidFormat { .. })
    }

    /// Returns `true` if an upload lookup failed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::UploadNotFound(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
