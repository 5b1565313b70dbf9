//! Index table construction
//!
//! Offsets depend on every file's size and the name slot width may depend
//! on every file's name, so the whole batch is resolved here before a
//! single byte of the archive is written.

use crate::error::{Error, Result};

use super::name::check_width;
use super::types::{NameWidthPolicy, PacEntry, PacHeader, PacIndex, PacVersion};
use super::HEADER_SIZE;

/// A file ready to be indexed: its stored name and its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub display_name: String,
    pub encoded_name: Vec<u8>,
    pub size: u64,
}

/// Computes the header and per-entry offsets for an archive
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder {
    version: PacVersion,
    name_width: NameWidthPolicy,
}

impl IndexBuilder {
    #[must_use]
    pub fn new(version: PacVersion) -> Self {
        Self {
            version,
            name_width: NameWidthPolicy::default(),
        }
    }

    /// Set the name slot width policy
    #[must_use]
    pub fn with_name_width(mut self, policy: NameWidthPolicy) -> Self {
        self.name_width = policy;
        self
    }

    /// Build the index, preserving the order of `raw`.
    pub fn build(&self, raw: Vec<RawEntry>) -> Result<PacIndex> {
        let entry_count = i16::try_from(raw.len())
            .map_err(|_| Error::EntryCountOverflow { count: raw.len() })?;

        let name_field_width = self.resolve_name_width(&raw)?;
        let record_size = u32::from(name_field_width) + self.version.record_overhead() as u32;
        let data_region_offset = (entry_count as u32)
            .checked_mul(record_size)
            .and_then(|table| table.checked_add(HEADER_SIZE as u32))
            .ok_or(Error::EntryCountOverflow { count: raw.len() })?;

        let mut entries = Vec::with_capacity(raw.len());
        let mut offset: u64 = 0;
        for entry in raw {
            let payload_size = u32::try_from(entry.size).map_err(|_| Error::PayloadTooLarge {
                name: entry.display_name.clone(),
                size: entry.size,
            })?;
            if self.version == PacVersion::V1 && u32::try_from(offset).is_err() {
                return Err(Error::OffsetOverflow {
                    name: entry.display_name,
                    offset,
                });
            }

            tracing::debug!(
                "Indexed {} at +{} ({} bytes)",
                entry.display_name,
                offset,
                payload_size
            );
            entries.push(PacEntry {
                display_name: entry.display_name,
                encoded_name: entry.encoded_name,
                payload_offset: offset,
                payload_size,
            });
            offset += u64::from(payload_size);
        }

        Ok(PacIndex {
            version: self.version,
            header: PacHeader {
                entry_count,
                name_field_width,
                data_region_offset,
            },
            entries,
        })
    }

    fn resolve_name_width(&self, raw: &[RawEntry]) -> Result<u8> {
        match self.name_width {
            NameWidthPolicy::Fixed(width) => {
                for entry in raw {
                    check_width(&entry.display_name, &entry.encoded_name, usize::from(width))?;
                }
                Ok(width)
            }
            NameWidthPolicy::Adaptive => {
                let Some(longest) = raw.iter().max_by_key(|e| e.encoded_name.len()) else {
                    return Ok(0);
                };
                check_width(
                    &longest.display_name,
                    &longest.encoded_name,
                    usize::from(u8::MAX),
                )?;
                Ok(longest.encoded_name.len() as u8)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(name: &str, size: u64) -> RawEntry {
        RawEntry {
            display_name: name.to_string(),
            encoded_name: name.as_bytes().to_vec(),
            size,
        }
    }

    #[test]
    fn test_offsets_follow_sizes() {
        let index = IndexBuilder::new(PacVersion::V1)
            .with_name_width(NameWidthPolicy::Fixed(16))
            .build(vec![raw("a", 10), raw("b", 0), raw("c", 5)])
            .unwrap();

        assert_eq!(
            index.header,
            PacHeader {
                entry_count: 3,
                name_field_width: 16,
                data_region_offset: 79,
            }
        );
        let offsets: Vec<_> = index.entries.iter().map(|e| e.payload_offset).collect();
        assert_eq!(offsets, vec![0, 10, 10]);
        assert_eq!(index.payload_len(), 15);
        assert_eq!(index.archive_len(), 94);
    }

    #[test]
    fn test_offset_recurrence() {
        let sizes = [3u64, 1, 4, 1, 5, 9, 2, 6];
        let input = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| raw(&format!("f{i}"), s))
            .collect();
        let index = IndexBuilder::new(PacVersion::V2).build(input).unwrap();

        assert_eq!(index.entries[0].payload_offset, 0);
        for pair in index.entries.windows(2) {
            assert_eq!(
                pair[1].payload_offset,
                pair[0].payload_offset + u64::from(pair[0].payload_size)
            );
        }
    }

    #[test]
    fn test_data_offset_per_version() {
        let input = vec![raw("a", 1), raw("b", 2)];
        let v1 = IndexBuilder::new(PacVersion::V1).build(input.clone()).unwrap();
        let v2 = IndexBuilder::new(PacVersion::V2).build(input).unwrap();
        assert_eq!(v1.header.data_region_offset, 7 + (22 + 8) * 2);
        assert_eq!(v2.header.data_region_offset, 7 + (22 + 12) * 2);
    }

    #[test]
    fn test_fixed_width_rejects_long_names() {
        let err = IndexBuilder::new(PacVersion::V1)
            .with_name_width(NameWidthPolicy::Fixed(4))
            .build(vec![raw("abcd", 1), raw("abcde", 1)])
            .unwrap_err();
        assert!(matches!(err, Error::NameTooLong { ref name, .. } if name == "abcde"));
    }

    #[test]
    fn test_adaptive_width() {
        let index = IndexBuilder::new(PacVersion::V1)
            .with_name_width(NameWidthPolicy::Adaptive)
            .build(vec![raw("ab", 1), raw("abcdef", 1), raw("a", 1)])
            .unwrap();
        assert_eq!(index.header.name_field_width, 6);
        assert_eq!(index.header.data_region_offset, 7 + (6 + 8) * 3);
    }

    #[test]
    fn test_adaptive_width_limit() {
        let long = "x".repeat(256);
        let err = IndexBuilder::new(PacVersion::V1)
            .with_name_width(NameWidthPolicy::Adaptive)
            .build(vec![raw(&long, 1)])
            .unwrap_err();
        assert!(matches!(err, Error::NameTooLong { width: 255, .. }));
    }

    #[test]
    fn test_empty_batch() {
        let index = IndexBuilder::new(PacVersion::V1)
            .with_name_width(NameWidthPolicy::Adaptive)
            .build(Vec::new())
            .unwrap();
        assert_eq!(index.header.entry_count, 0);
        assert_eq!(index.header.name_field_width, 0);
        assert_eq!(index.header.data_region_offset, 7);
    }

    #[test]
    fn test_entry_count_overflow() {
        let input = (0..=i16::MAX as usize).map(|_| raw("a", 0)).collect();
        let err = IndexBuilder::new(PacVersion::V1).build(input).unwrap_err();
        assert!(matches!(err, Error::EntryCountOverflow { count: 32768 }));
    }

    #[test]
    fn test_entry_count_at_limit() {
        let input = (0..i16::MAX as usize).map(|_| raw("a", 0)).collect();
        let index = IndexBuilder::new(PacVersion::V1).build(input).unwrap();
        assert_eq!(index.header.entry_count, i16::MAX);
    }

    #[test]
    fn test_payload_too_large() {
        let err = IndexBuilder::new(PacVersion::V2)
            .build(vec![raw("big", u64::from(u32::MAX) + 1)])
            .unwrap_err();
        assert!(matches!(err, Error::PayloadTooLarge { .. }));
    }

    #[test]
    fn test_v1_offset_overflow() {
        let input = vec![raw("a", u64::from(u32::MAX)), raw("b", 1), raw("c", 1)];
        let err = IndexBuilder::new(PacVersion::V1)
            .build(input.clone())
            .unwrap_err();
        assert!(matches!(err, Error::OffsetOverflow { ref name, .. } if name == "c"));

        let index = IndexBuilder::new(PacVersion::V2).build(input).unwrap();
        assert_eq!(index.entries[2].payload_offset, u64::from(u32::MAX) + 1);
    }
}
