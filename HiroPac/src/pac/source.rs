//! Source directory listing
//!
//! Archive entry order is the order the directory listing yields. That
//! order is platform- and filesystem-dependent and is deliberately not
//! sorted: whatever the listing returns is what the archive stores.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::script::is_script_name;

/// A regular file found at the top level of the source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path of the file
    pub path: PathBuf,
    /// File name as listed, before suffix stripping
    pub file_name: String,
    /// Size in bytes at listing time
    pub size: u64,
}

impl SourceFile {
    /// True if the payload must go through the script obfuscator
    #[must_use]
    pub fn is_script(&self) -> bool {
        is_script_name(&self.file_name)
    }
}

/// List the regular files directly inside `dir`, in listing order.
///
/// Subdirectories are not descended into. Symlinks are followed, and
/// `.DS_Store` files are skipped.
pub fn list_source_files(dir: &Path) -> Result<Vec<SourceFile>> {
    if !dir.is_dir() {
        return Err(Error::PathNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_str().ok_or_else(|| Error::EncodingFailure {
            name: entry.file_name().to_string_lossy().into_owned(),
        })?;
        if file_name == ".DS_Store" {
            continue;
        }

        let size = entry.metadata()?.len();
        tracing::debug!("Found {} ({} bytes)", file_name, size);
        files.push(SourceFile {
            file_name: file_name.to_string(),
            path: entry.into_path(),
            size,
        });
    }

    Ok(files)
}
