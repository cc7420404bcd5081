//! Module targets: one binary plus its discovered symbol format.

use std::path::{Path, PathBuf};

use bobbin_module::SymbolFormat;

/// One module binary queued for weaving.
///
/// The symbol format is derived, never configured: discovery probes the
/// symbol-file variants next to the binary and records which one exists.
///
/// # Example
///
/// ```
/// use bobbin_pipeline::ModuleTarget;
/// use bobbin_module::SymbolFormat;
/// use std::path::Path;
///
/// let target = ModuleTarget::discover(Path::new("/out/App.Core.dll"));
/// assert_eq!(target.symbols(), SymbolFormat::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTarget {
    binary_path: PathBuf,
    symbols: SymbolFormat,
}

impl ModuleTarget {
    /// Builds a target with an explicit symbol format.
    #[must_use]
    pub fn new(binary_path: impl Into<PathBuf>, symbols: SymbolFormat) -> Self {
        Self {
            binary_path: binary_path.into(),
            symbols,
        }
    }

    /// Builds a target by probing the filesystem for symbol files.
    #[must_use]
    pub fn discover(binary_path: &Path) -> Self {
        Self {
            binary_path: binary_path.to_path_buf(),
            symbols: SymbolFormat::probe(binary_path),
        }
    }

    /// Path of the module binary.
    #[must_use]
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Symbol format selected at discovery time.
    #[must_use]
    pub const fn symbols(&self) -> SymbolFormat {
        self.symbols
    }
}

#[cfg(test)]
mod tests;
