//! Domain errors raised by module reading and writing.
//!
//! I/O errors are wrapped in `Arc` to satisfy the `result_large_err` Clippy
//! lint and to keep the error type cheaply cloneable into run reports.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from module codec operations.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// The module binary or its symbol file could not be read.
    #[error("failed to read module '{}': {source}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The module binary or its symbol file could not be written.
    #[error("failed to write module '{}': {source}", path.display())]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The on-disk content does not decode into a module image.
    #[error("module '{}' is not a valid image: {message}", path.display())]
    Decode {
        /// Path whose content failed to decode.
        path: PathBuf,
        /// Description of the decode failure.
        message: String,
    },

    /// The image could not be encoded for writing.
    #[error("failed to encode image for '{}': {message}", path.display())]
    Encode {
        /// Destination path.
        path: PathBuf,
        /// Description of the encode failure.
        message: String,
    },
}

impl ModuleError {
    /// Wraps an I/O error from reading `path`.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Wraps an I/O error from writing `path`.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}
