//! Index name handling
//!
//! Unpackers append an extension to some payloads (`.ogg` audio, `.grd`
//! images, `.srp` scripts) that the engine does not store. The index keeps
//! the bare name, Shift-JIS encoded.

use encoding_rs::SHIFT_JIS;

use crate::error::{Error, Result};

/// Suffixes removed from file names before they are stored
pub const STRIPPED_SUFFIXES: [&str; 3] = [".ogg", ".grd", ".srp"];

/// Remove one trailing loader suffix, ignoring ASCII case.
///
/// A name that consists only of a suffix is returned unchanged.
#[must_use]
pub fn strip_loader_suffix(file_name: &str) -> &str {
    for suffix in STRIPPED_SUFFIXES {
        let Some(split) = file_name.len().checked_sub(suffix.len()) else {
            continue;
        };
        if split == 0 || !file_name.is_char_boundary(split) {
            continue;
        }
        let (stem, tail) = file_name.split_at(split);
        if tail.eq_ignore_ascii_case(suffix) {
            return stem;
        }
    }
    file_name
}

/// Encode a name as Shift-JIS.
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = SHIFT_JIS.encode(name);
    if had_errors {
        return Err(Error::EncodingFailure {
            name: name.to_string(),
        });
    }
    Ok(bytes.into_owned())
}

/// Reject names that do not fit a name slot of `width` bytes.
pub fn check_width(name: &str, encoded: &[u8], width: usize) -> Result<()> {
    if encoded.len() > width {
        return Err(Error::NameTooLong {
            name: name.to_string(),
            encoded_len: encoded.len(),
            width,
        });
    }
    Ok(())
}
