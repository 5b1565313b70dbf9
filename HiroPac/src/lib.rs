//! # HiroPac
//!
//! A pure-Rust repacker for the PAC archives of the TmrHiro visual-novel
//! engine. It turns a directory of unpacked files back into an archive the
//! engine accepts, byte for byte.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hiropac::pac::{PacOperations, PacVersion};
//!
//! // Writes data.pac next to the data/ folder
//! let output = PacOperations::repack("data", PacVersion::V1)?;
//! println!("Wrote {}", output.display());
//! # Ok::<(), hiropac::Error>(())
//! ```
//!
//! ### Lower-level control
//!
//! ```no_run
//! use hiropac::pac::{NameWidthPolicy, PacVersion, PacWriter};
//!
//! let index = PacWriter::new("data")?
//!     .with_version(PacVersion::V2)
//!     .with_name_width(NameWidthPolicy::Adaptive)
//!     .write("data.pac")?;
//! println!("{} entries", index.entries.len());
//! # Ok::<(), hiropac::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `hiropac` command-line binary

pub mod error;
pub mod pac;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::pac::{
        NameWidthPolicy, PacIndex, PacOperations, PacVersion, PacWriter, PackPhase,
        PackProgress,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
