//! Error types for bibref.

use std::io;
use std::path::PathBuf;

use bibref_config::ConfigError;

/// Errors that abort a documentation build.
///
/// Unknown citation keys are not errors; they render as a visible sentinel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The bibliography file is missing or unreadable.
    #[error("Failed to read bibliography {}: {source}", path.display())]
    Read {
        /// Bibliography file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The BibTeX parser rejected the bibliography.
    #[error("Failed to parse bibliography: {message}")]
    Parse {
        /// Parser error message.
        message: String,
    },
}
