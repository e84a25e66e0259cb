//! Error types for bibliography loading.

use thiserror::Error;

/// Errors that can occur while loading a bibliography file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The bibliography file could not be opened or read.
    #[error("cannot read bibliography file '{path}': {source}")]
    Unreadable {
        /// Path as supplied on the command line.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but yielded no usable entries.
    #[error("no usable entries found in '{path}' ({skipped} entries skipped)")]
    NoEntries {
        /// Path as supplied on the command line.
        path: String,
        /// Number of entries that were skipped as malformed or untitled.
        skipped: usize,
    },
}
