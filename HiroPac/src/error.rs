//! Error types for `HiroPac`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `HiroPac` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error while listing the source folder.
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    // ==================== Argument Errors ====================
    /// A caller-supplied argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The source directory does not exist.
    #[error("path not found: {}", .path.display())]
    PathNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    // ==================== Name Slot Errors ====================
    /// An encoded file name does not fit the archive's name slot.
    #[error("file name too long: {name} encodes to {encoded_len} bytes (name slot is {width})")]
    NameTooLong {
        /// The name as it would be stored in the index.
        name: String,
        /// Length of the Shift-JIS encoded name.
        encoded_len: usize,
        /// Width of the name slot.
        width: usize,
    },

    /// A file name contains characters with no Shift-JIS mapping.
    #[error("file name cannot be encoded as Shift-JIS: {name}")]
    EncodingFailure {
        /// The offending name (lossy if it was not valid UTF-8).
        name: String,
    },

    // ==================== Index Errors ====================
    /// More files than the 16-bit signed entry count can describe.
    #[error("too many files for a PAC archive: {count} (maximum {})", i16::MAX)]
    EntryCountOverflow {
        /// Number of files found in the source directory.
        count: usize,
    },

    /// A single file is larger than the 32-bit size field allows.
    #[error("file {name} is too large for a PAC entry: {size} bytes")]
    PayloadTooLarge {
        /// Name of the file.
        name: String,
        /// Size in bytes.
        size: u64,
    },

    /// A payload offset does not fit the version's offset field.
    #[error("payload offset of {name} does not fit a 32-bit field: {offset}")]
    OffsetOverflow {
        /// Name of the entry whose offset overflowed.
        name: String,
        /// The offending offset.
        offset: u64,
    },

    // ==================== Payload Errors ====================
    /// A script payload's record stream runs past the end of its buffer.
    #[error("malformed script payload at offset {offset}: {reason}")]
    MalformedScriptPayload {
        /// Cursor position where the walk failed.
        offset: usize,
        /// What was being read.
        reason: String,
    },

    /// A source file changed size between the index pass and the write pass.
    #[error("{} changed while packing: indexed {expected} bytes, read {actual}", .path.display())]
    SourceChanged {
        /// The source file.
        path: PathBuf,
        /// Size recorded in the index.
        expected: u64,
        /// Bytes actually read.
        actual: u64,
    },
}

/// Result type alias for `HiroPac` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::MalformedScriptPayload`].
    pub(crate) fn malformed_script(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedScriptPayload {
            offset,
            reason: reason.into(),
        }
    }
}
