//! Types for PAC archive handling

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::DEFAULT_NAME_WIDTH;

/// On-disk format variant of a PAC archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacVersion {
    /// 32-bit payload offsets
    V1,
    /// 64-bit payload offsets
    V2,
}

impl PacVersion {
    /// Width in bytes of an index record's offset field
    #[must_use]
    pub fn offset_width(self) -> usize {
        match self {
            PacVersion::V1 => 4,
            PacVersion::V2 => 8,
        }
    }

    /// Width in bytes of an index record's size field
    #[must_use]
    pub fn size_width(self) -> usize {
        4
    }

    /// Bytes an index record takes beyond its name slot
    #[must_use]
    pub fn record_overhead(self) -> usize {
        self.offset_width() + self.size_width()
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            PacVersion::V1 => 1,
            PacVersion::V2 => 2,
        }
    }
}

impl FromStr for PacVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(PacVersion::V1),
            "2" => Ok(PacVersion::V2),
            other => Err(Error::InvalidArgument(format!(
                "invalid version '{other}' (expected 1 or 2)"
            ))),
        }
    }
}

impl fmt::Display for PacVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// How the width of the index name slots is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameWidthPolicy {
    /// Every archive uses the same width; longer names are rejected.
    Fixed(u8),
    /// Width is the longest encoded name in the batch.
    Adaptive,
}

impl Default for NameWidthPolicy {
    fn default() -> Self {
        NameWidthPolicy::Fixed(DEFAULT_NAME_WIDTH)
    }
}

/// Fixed-size prefix of a PAC archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacHeader {
    /// Number of index records
    pub entry_count: i16,
    /// Bytes per name slot
    pub name_field_width: u8,
    /// Absolute file offset where payload bytes begin
    pub data_region_offset: u32,
}

/// One file in the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacEntry {
    /// Name stored in the index, after loader suffix stripping
    pub display_name: String,
    /// `display_name` in Shift-JIS
    pub encoded_name: Vec<u8>,
    /// Offset relative to the start of the payload area
    pub payload_offset: u64,
    /// Exact size of the source file
    pub payload_size: u32,
}

/// Header and entries computed for one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacIndex {
    pub version: PacVersion,
    pub header: PacHeader,
    pub entries: Vec<PacEntry>,
}

impl PacIndex {
    /// Total size of all payloads
    #[must_use]
    pub fn payload_len(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.payload_size))
            .sum()
    }

    /// Expected size of the finished archive
    #[must_use]
    pub fn archive_len(&self) -> u64 {
        u64::from(self.header.data_region_offset) + self.payload_len()
    }
}

/// Progress information during a repack
#[derive(Debug, Clone)]
pub struct PackProgress {
    /// Current operation phase
    pub phase: PackPhase,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Current file being processed (if applicable)
    pub current_file: Option<String>,
}

impl PackProgress {
    #[must_use]
    pub fn new(phase: PackPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: PackPhase,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of a repack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackPhase {
    /// Listing the source directory
    ScanningFiles,
    /// Encoding names and computing offsets
    BuildingIndex,
    /// Writing the header and index table
    WritingIndex,
    /// Copying (and obfuscating) payloads
    WritingPayloads,
    /// Operation complete
    Complete,
}

impl PackPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScanningFiles => "Scanning files",
            Self::BuildingIndex => "Building index",
            Self::WritingIndex => "Writing index",
            Self::WritingPayloads => "Writing payloads",
            Self::Complete => "Complete",
        }
    }
}
