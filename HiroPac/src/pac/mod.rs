//! PAC archive repacking
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! [i16 entry_count]
//! [u8  name_field_width]
//! [u32 data_region_offset]
//! entry_count x {
//!     [name_field_width bytes: Shift-JIS name, zero-padded]
//!     [u32 offset (v1) | u64 offset (v2)]   relative to data_region_offset
//!     [u32 size]
//! }
//! payloads, concatenated in index order
//! ```

mod index;
mod name;
mod operations;
mod script;
mod source;
mod types;
mod writer;

/// Size of the fixed header
pub const HEADER_SIZE: usize = 7;

/// Name slot width used by the engine's own archives
pub const DEFAULT_NAME_WIDTH: u8 = 0x16;

pub use index::{IndexBuilder, RawEntry};
pub use name::{STRIPPED_SUFFIXES, check_width, encode_name, strip_loader_suffix};
pub use operations::{PAC_EXTENSION, PacOperations};
pub use script::{SCRIPT_EXTENSION, deobfuscate_script, is_script_name, obfuscate_script};
pub use source::{SourceFile, list_source_files};
pub use types::{
    NameWidthPolicy, PacEntry, PacHeader, PacIndex, PacVersion, PackPhase, PackProgress,
};
pub use writer::{PacWriter, ProgressCallback, serialize_index};
