use std::path::Path;
use std::time::Instant;

use crate::Error;
use crate::cli::progress::{LOOKING_GLASS, PACKAGE, print_done, print_step, simple_bar};
use crate::pac::{PacOperations, PacVersion, PackPhase, PackProgress};

pub fn execute(folder: &Path, version: PacVersion) -> anyhow::Result<()> {
    let output = PacOperations::default_output_path(folder)?;
    let name = output
        .file_stem()
        .map_or_else(|| folder.display().to_string(), |n| n.to_string_lossy().into_owned());

    print_step(1, 2, LOOKING_GLASS, &format!("Repacking {name} (version {version})"));
    let started = Instant::now();

    let pb = simple_bar(0, PackPhase::ScanningFiles.as_str());
    let result = PacOperations::repack_with_progress(folder, version, &|progress: &PackProgress| {
        if progress.phase == PackPhase::WritingPayloads {
            pb.set_length(progress.total as u64);
            pb.set_position(progress.current as u64);
            if let Some(ref file) = progress.current_file {
                pb.set_message(file.clone());
            }
        } else {
            pb.set_message(progress.phase.as_str());
        }
    });
    pb.finish_and_clear();

    match result {
        Ok(written) => {
            print_step(2, 2, PACKAGE, &format!("Repack successful: {}", written.display()));
            print_done(started.elapsed());
            Ok(())
        }
        Err(Error::PathNotFound { path }) => {
            anyhow::bail!("Invalid folder path: {}", path.display())
        }
        Err(e) => {
            println!("Repack failed: {e}");
            Err(e.into())
        }
    }
}
