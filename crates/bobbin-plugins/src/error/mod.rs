//! Domain errors raised while resolving, loading, and activating weavers.
//!
//! Every variant here is a non-fatal, plugin-dropped condition: the lineup
//! assembler converts it into a [`crate::lineup::Disposition`] entry and
//! continues with the remaining declarations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors arising from weaver resolution, loading, and instantiation.
#[derive(Debug, Clone, Error)]
pub enum PluginError {
    /// No binary artifact matches the weaver name.
    #[error("no binary found for weaver '{name}'")]
    BinaryNotFound {
        /// Weaver name that was looked up.
        name: String,
    },

    /// The weaver binary exists but could not be loaded into the process.
    #[error("failed to load weaver binary '{}': {message}", path.display())]
    LoadFailed {
        /// Binary path that failed to load.
        path: PathBuf,
        /// Loader description of the failure.
        message: String,
    },

    /// The loaded binary does not export the expected constructor symbol.
    #[error("weaver binary '{}' does not export entry point '{symbol}'", path.display())]
    EntryPointMissing {
        /// Binary path that was searched.
        path: PathBuf,
        /// Exact symbol name that was looked up.
        symbol: String,
    },

    /// The exported constructor ran but produced no usable instance.
    #[error("weaver binary '{}' failed to construct an instance: {message}", path.display())]
    ConstructFailed {
        /// Binary path whose constructor failed.
        path: PathBuf,
        /// Description of the construction failure.
        message: String,
    },
}
