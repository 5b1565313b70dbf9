//! High-level repack operations

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::types::{NameWidthPolicy, PacIndex, PacVersion, PackPhase, PackProgress};
use super::writer::{PacWriter, ProgressCallback};

/// Extension of produced archives
pub const PAC_EXTENSION: &str = "pac";

/// High-level PAC repack operations.
pub struct PacOperations;

impl PacOperations {
    /// Repack `folder` into `<folder>.pac` next to it.
    ///
    /// Returns the path of the written archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if `folder` is not a directory.
    /// Returns [`Error::NameTooLong`] or [`Error::EncodingFailure`] if a file name cannot be stored.
    /// Returns [`Error::EntryCountOverflow`] if the folder holds more than 32767 files.
    /// Returns [`Error::MalformedScriptPayload`] if a `.srp` file is not a valid record stream.
    /// Returns [`Error::Io`] on filesystem failures.
    pub fn repack<P: AsRef<Path>>(folder: P, version: PacVersion) -> Result<PathBuf> {
        Self::repack_with_progress(folder, version, &|_| {})
    }

    /// Repack with a progress callback
    pub fn repack_with_progress<P: AsRef<Path>>(
        folder: P,
        version: PacVersion,
        progress: ProgressCallback,
    ) -> Result<PathBuf> {
        let output = Self::default_output_path(folder.as_ref())?;
        Self::repack_to(folder, &output, version, NameWidthPolicy::default(), progress)?;
        Ok(output)
    }

    /// Repack into an explicit output path with an explicit name width policy.
    pub fn repack_to<P: AsRef<Path>, Q: AsRef<Path>>(
        folder: P,
        output: Q,
        version: PacVersion,
        name_width: NameWidthPolicy,
        progress: ProgressCallback,
    ) -> Result<PacIndex> {
        progress(&PackProgress::new(PackPhase::ScanningFiles, 0, 0));
        PacWriter::new(folder)?
            .with_version(version)
            .with_name_width(name_width)
            .write_with_progress(output, progress)
    }

    /// Compute the index for `folder` without writing anything.
    pub fn plan<P: AsRef<Path>>(
        folder: P,
        version: PacVersion,
        name_width: NameWidthPolicy,
    ) -> Result<PacIndex> {
        PacWriter::new(folder.as_ref())?
            .with_version(version)
            .with_name_width(name_width)
            .plan()
    }

    /// `<parent>/<folder name>.pac`
    ///
    /// The folder is made absolute without resolving symlinks, so a linked
    /// folder is named after the link. Only a path ending in `..` is
    /// canonicalized to find its name.
    pub fn default_output_path(folder: &Path) -> Result<PathBuf> {
        let mut folder = std::path::absolute(folder)?;
        if folder.file_name().is_none() {
            folder = folder.canonicalize().map_err(|_| Error::PathNotFound {
                path: folder.clone(),
            })?;
        }
        let name = folder.file_name().ok_or_else(|| {
            Error::InvalidArgument(format!("{} has no folder name", folder.display()))
        })?;

        let mut file_name = name.to_os_string();
        file_name.push(".");
        file_name.push(PAC_EXTENSION);
        Ok(folder.with_file_name(file_name))
    }
}
