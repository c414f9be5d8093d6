//! Unified error types for chatstat.
//!
//! Every fallible operation in the library returns [`ChatstatError`]. The
//! variants map one-to-one onto the failure modes of the pipeline:
//!
//! - reading the input ([`FileAccess`](ChatstatError::FileAccess),
//!   [`Archive`](ChatstatError::Archive), [`NoTextEntry`](ChatstatError::NoTextEntry),
//!   [`Decode`](ChatstatError::Decode))
//! - extracting messages ([`TimestampParse`](ChatstatError::TimestampParse))
//! - aggregating and rendering ([`EmptyDataset`](ChatstatError::EmptyDataset),
//!   [`Chart`](ChatstatError::Chart), [`Io`](ChatstatError::Io))

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// The input file could not be opened or read.
    #[error("Cannot read {}: {source}", path.display())]
    FileAccess {
        /// The path that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The input looked like a zip archive but could not be read as one.
    #[error("Malformed archive {}: {source}", path.display())]
    Archive {
        /// Path of the archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// The zip archive has no `.txt` member.
    #[error("No .txt file found in the archive {}", path.display())]
    NoTextEntry {
        /// Path of the archive
        path: PathBuf,
    },

    /// Content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Decode {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A line had the shape of a chat message but its timestamp is not a
    /// valid `DD/MM/YYYY, HH:MM` date.
    #[error("Invalid timestamp '{input}' on line {line}: {source} (expected DD/MM/YYYY, HH:MM)")]
    TimestampParse {
        /// 1-based line number in the input
        line: usize,
        /// The text that failed to parse
        input: String,
        /// The underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// There are no message records to aggregate or render.
    #[error("No chat messages found; nothing to analyze")]
    EmptyDataset,

    /// The chart backend failed while drawing.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Writing rendered output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates a file access error for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatstatError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed archive error for `path`.
    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ChatstatError::Archive {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error with a description of what was being decoded.
    pub fn decode(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatstatError::Decode {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if the input could not be opened or read.
    pub fn is_file_access(&self) -> bool {
        matches!(self, ChatstatError::FileAccess { .. })
    }

    /// Returns `true` if this is a malformed archive error.
    pub fn is_archive(&self) -> bool {
        matches!(self, ChatstatError::Archive { .. })
    }

    /// Returns `true` if the archive had no text member.
    pub fn is_no_text_entry(&self) -> bool {
        matches!(self, ChatstatError::NoTextEntry { .. })
    }

    /// Returns `true` if this is a UTF-8 decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatstatError::Decode { .. })
    }

    /// Returns `true` if this is a timestamp parse error.
    pub fn is_timestamp_parse(&self) -> bool {
        matches!(self, ChatstatError::TimestampParse { .. })
    }

    /// Creates a chart error from a drawing backend failure.
    pub fn chart(source: impl std::fmt::Display) -> Self {
        ChatstatError::Chart(source.to_string())
    }

    /// Returns `true` if the chart backend failed.
    pub fn is_chart(&self) -> bool {
        matches!(self, ChatstatError::Chart(_))
    }

    /// Returns `true` if there was nothing to aggregate.
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, ChatstatError::EmptyDataset)
    }
}
