//! PAC archive writer with progress callbacks

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};

use super::index::{IndexBuilder, RawEntry};
use super::name::{encode_name, strip_loader_suffix};
use super::script::obfuscate_script;
use super::source::{SourceFile, list_source_files};
use super::types::{NameWidthPolicy, PacIndex, PacVersion, PackPhase, PackProgress};

/// Progress callback for PAC writes.
pub type ProgressCallback<'a> = &'a dyn Fn(&PackProgress);

/// PAC archive writer
pub struct PacWriter {
    /// Files to include, in listing order
    files: Vec<SourceFile>,
    /// Archive format to write
    version: PacVersion,
    /// Name slot width policy
    name_width: NameWidthPolicy,
}

impl PacWriter {
    /// Create a new writer for the given directory
    pub fn new(root_path: impl AsRef<Path>) -> Result<Self> {
        let root_path = root_path.as_ref();
        tracing::info!("Scanning directory: {}", root_path.display());
        let files = list_source_files(root_path)?;
        tracing::debug!("Found {} files", files.len());

        Ok(Self {
            files,
            version: PacVersion::V1,
            name_width: NameWidthPolicy::default(),
        })
    }

    /// Set the archive version to write
    #[must_use]
    pub fn with_version(mut self, version: PacVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the name slot width policy
    #[must_use]
    pub fn with_name_width(mut self, policy: NameWidthPolicy) -> Self {
        self.name_width = policy;
        self
    }

    /// Encode every name and compute the index without touching the output.
    pub fn plan(&self) -> Result<PacIndex> {
        let raw = self
            .files
            .iter()
            .map(|file| {
                let display_name = strip_loader_suffix(&file.file_name).to_string();
                let encoded_name = encode_name(&display_name)?;
                Ok(RawEntry {
                    display_name,
                    encoded_name,
                    size: file.size,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        IndexBuilder::new(self.version)
            .with_name_width(self.name_width)
            .build(raw)
    }

    /// Write the PAC file
    pub fn write(&self, output_path: impl AsRef<Path>) -> Result<PacIndex> {
        self.write_with_progress(output_path, &|_| {})
    }

    /// Write the PAC file with progress callback
    ///
    /// The index is fully computed before the output is created, so name,
    /// encoding and count errors leave no file behind. Errors during the
    /// write pass remove the partial output.
    pub fn write_with_progress(
        &self,
        output_path: impl AsRef<Path>,
        progress: ProgressCallback,
    ) -> Result<PacIndex> {
        let output_path = output_path.as_ref();
        let total_files = self.files.len();

        progress(&PackProgress::new(PackPhase::BuildingIndex, 0, total_files));
        let index = self.plan()?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(output_path)?;

        if let Err(e) = self.write_archive(file, &index, progress) {
            if let Err(cleanup) = std::fs::remove_file(output_path) {
                tracing::warn!(
                    "Failed to remove partial archive {}: {}",
                    output_path.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        progress(&PackProgress::new(PackPhase::Complete, total_files, total_files));
        tracing::info!(
            "Wrote {} entries ({} bytes) to {}",
            index.entries.len(),
            index.archive_len(),
            output_path.display()
        );
        Ok(index)
    }

    fn write_archive(
        &self,
        file: File,
        index: &PacIndex,
        progress: ProgressCallback,
    ) -> Result<()> {
        let total_files = self.files.len();
        let mut output = BufWriter::new(file);

        progress(&PackProgress::new(PackPhase::WritingIndex, 0, total_files));
        serialize_index(index, &mut output)?;

        for (i, (source, entry)) in self.files.iter().zip(&index.entries).enumerate() {
            progress(&PackProgress::with_file(
                PackPhase::WritingPayloads,
                i + 1,
                total_files,
                &source.file_name,
            ));

            let expected = u64::from(entry.payload_size);
            let written = if source.is_script() {
                tracing::debug!("Obfuscating script {} ({} bytes)", source.file_name, expected);
                let mut data = std::fs::read(&source.path)?;
                if data.len() as u64 != expected {
                    return Err(source_changed(source, expected, data.len() as u64));
                }
                obfuscate_script(&mut data)?;
                output.write_all(&data)?;
                data.len() as u64
            } else {
                // One byte past the indexed size is enough to notice growth.
                let mut input = File::open(&source.path)?.take(expected + 1);
                io::copy(&mut input, &mut output)?
            };

            if written != expected {
                return Err(source_changed(source, expected, written));
            }
        }

        output.flush()?;
        Ok(())
    }
}

fn source_changed(source: &SourceFile, expected: u64, actual: u64) -> Error {
    Error::SourceChanged {
        path: source.path.clone(),
        expected,
        actual,
    }
}

/// Write the header and index table of `index`.
pub fn serialize_index<W: Write>(index: &PacIndex, writer: &mut W) -> Result<()> {
    let header = &index.header;
    writer.write_i16::<LittleEndian>(header.entry_count)?;
    writer.write_u8(header.name_field_width)?;
    writer.write_u32::<LittleEndian>(header.data_region_offset)?;

    let mut name_slot = vec![0u8; usize::from(header.name_field_width)];
    for entry in &index.entries {
        // Widths were checked when the index was built.
        name_slot.fill(0);
        name_slot[..entry.encoded_name.len()].copy_from_slice(&entry.encoded_name);
        writer.write_all(&name_slot)?;

        match index.version {
            PacVersion::V1 => writer.write_u32::<LittleEndian>(entry.payload_offset as u32)?,
            PacVersion::V2 => writer.write_u64::<LittleEndian>(entry.payload_offset)?,
        }
        writer.write_u32::<LittleEndian>(entry.payload_size)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::types::{PacEntry, PacHeader};
    use pretty_assertions::assert_eq;

    fn entry(name: &str, offset: u64, size: u32) -> PacEntry {
        PacEntry {
            display_name: name.to_string(),
            encoded_name: name.as_bytes().to_vec(),
            payload_offset: offset,
            payload_size: size,
        }
    }

    #[test]
    fn test_serialize_v1() {
        let index = PacIndex {
            version: PacVersion::V1,
            header: PacHeader {
                entry_count: 1,
                name_field_width: 4,
                data_region_offset: 19,
            },
            entries: vec![entry("ab", 0, 3)],
        };
        let mut out = Vec::new();
        serialize_index(&index, &mut out).unwrap();
        assert_eq!(
            out,
            vec![
                0x01, 0x00, 0x04, 0x13, 0x00, 0x00, 0x00, // header
                b'a', b'b', 0x00, 0x00, // name slot
                0x00, 0x00, 0x00, 0x00, // offset
                0x03, 0x00, 0x00, 0x00, // size
            ]
        );
        assert_eq!(out.len(), index.header.data_region_offset as usize);
    }

    #[test]
    fn test_serialize_v2() {
        let index = PacIndex {
            version: PacVersion::V2,
            header: PacHeader {
                entry_count: 2,
                name_field_width: 2,
                data_region_offset: 7 + 14 * 2,
            },
            entries: vec![entry("a", 0, 0x0102), entry("bc", 0x0102, 1)],
        };
        let mut out = Vec::new();
        serialize_index(&index, &mut out).unwrap();
        assert_eq!(out.len(), 35);
        assert_eq!(&out[7..21], &[b'a', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02, 0x01, 0, 0]);
        assert_eq!(&out[21..35], &[b'b', b'c', 0x02, 0x01, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_plan_strips_and_encodes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("voice01.ogg"), b"abc").unwrap();

        let writer = PacWriter::new(dir.path()).unwrap();
        let index = writer.plan().unwrap();
        assert_eq!(index.entries[0].display_name, "voice01");
        assert_eq!(index.entries[0].encoded_name, b"voice01".to_vec());
        assert_eq!(index.entries.len(), 1);
    }

    #[test]
    fn test_progress_phases() {
        use std::cell::RefCell;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), b"1").unwrap();
        std::fs::write(dir.path().join("b"), b"22").unwrap();
        let out = dir.path().join("out.pac");

        let phases = RefCell::new(Vec::new());
        PacWriter::new(dir.path())
            .unwrap()
            .write_with_progress(&out, &|p: &PackProgress| phases.borrow_mut().push(p.phase))
            .unwrap();

        assert_eq!(
            phases.into_inner(),
            vec![
                PackPhase::BuildingIndex,
                PackPhase::WritingIndex,
                PackPhase::WritingPayloads,
                PackPhase::WritingPayloads,
                PackPhase::Complete,
            ]
        );
    }
}
