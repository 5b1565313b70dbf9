//! Script payload obfuscation
//!
//! `.srp` payloads are a record stream:
//!
//! ```text
//! [i32 record_count]
//! record_count x {
//!     [u16 chunk_size + 4]
//!     [4 bytes not touched by the transform]
//!     [chunk_size bytes, each nibble-rotated]
//! }
//! ```
//!
//! Unpackers rotate the chunk bytes right by four bits; repacking rotates
//! them left again. Every read is bounds-checked against the buffer.

use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::utils::{Rotation, rot_byte};

/// File extension (without the dot) of script payloads.
pub const SCRIPT_EXTENSION: &str = "srp";

/// Bytes between the start of a record and its chunk data.
const RECORD_HEADER_SIZE: usize = 6;

/// The record size field counts four bytes beyond the chunk itself.
const CHUNK_SIZE_BIAS: usize = 4;

const NIBBLE_BITS: u32 = 4;

/// Returns true if the file name carries the script extension.
#[must_use]
pub fn is_script_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
}

/// Re-apply the archive obfuscation to an unpacked script in place.
///
/// Returns the number of records transformed.
pub fn obfuscate_script(data: &mut [u8]) -> Result<usize> {
    rotate_chunks(data, Rotation::Left)
}

/// Undo [`obfuscate_script`], as an unpacker does.
pub fn deobfuscate_script(data: &mut [u8]) -> Result<usize> {
    rotate_chunks(data, Rotation::Right)
}

fn rotate_chunks(data: &mut [u8], direction: Rotation) -> Result<usize> {
    let count_bytes = data
        .get(..4)
        .ok_or_else(|| Error::malformed_script(0, "record count truncated"))?;
    let raw_count = LittleEndian::read_i32(count_bytes);
    let record_count = usize::try_from(raw_count)
        .map_err(|_| Error::malformed_script(0, format!("negative record count {raw_count}")))?;

    let mut cursor = 4;
    for record in 0..record_count {
        let size_bytes = data.get(cursor..cursor + 2).ok_or_else(|| {
            Error::malformed_script(cursor, format!("record {record} size truncated"))
        })?;
        let size_field = usize::from(LittleEndian::read_u16(size_bytes));
        let chunk_size = size_field.checked_sub(CHUNK_SIZE_BIAS).ok_or_else(|| {
            Error::malformed_script(
                cursor,
                format!("record {record} size field {size_field} is below {CHUNK_SIZE_BIAS}"),
            )
        })?;

        let start = cursor + RECORD_HEADER_SIZE;
        let end = start + chunk_size;
        let chunk = data.get_mut(start..end).ok_or_else(|| {
            Error::malformed_script(
                cursor,
                format!("record {record} chunk of {chunk_size} bytes runs past end of payload"),
            )
        })?;

        for byte in chunk.iter_mut() {
            *byte = rot_byte(*byte, NIBBLE_BITS, direction);
        }
        cursor = end;
    }

    Ok(record_count)
}
