//! HiroPac CLI - repack a folder into a PAC archive

pub mod progress;
pub mod repack;

use std::path::PathBuf;

use clap::Parser;

use crate::pac::PacVersion;

#[derive(Parser, Debug)]
#[command(name = "hiropac", version)]
#[command(about = "HiroPac: repack a folder into a TmrHiro PAC archive", long_about = None)]
struct Cli {
    /// Folder to pack; the archive is written next to it as <folder>.pac
    folder_path: PathBuf,

    /// Archive format version (1 or 2)
    #[arg(id = "format_version", value_name = "VERSION", value_parser = parse_version)]
    version: PacVersion,
}

fn parse_version(s: &str) -> Result<PacVersion, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

/// Run the HiroPac CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    repack::execute(&cli.folder_path, cli.version)
}
