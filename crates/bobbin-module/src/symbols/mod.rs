//! Debug-symbol format selection and path derivation.
//!
//! A module binary may be paired with one of two symbol-file variants:
//! a `pdb` file sharing the binary's stem (`App.Core.pdb` next to
//! `App.Core.dll`) or an `mdb` file suffixing the full binary name
//! (`App.Core.dll.mdb`). The two are not mutually round-trippable, so the
//! pipeline normalizes every write to the `mdb` form regardless of which
//! variant was read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension appended to the full binary file name for the `mdb` variant.
const MDB_SUFFIX: &str = ".mdb";

/// Which debug-symbol variant accompanies a module binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolFormat {
    /// No symbol file exists; none is read or written.
    #[default]
    None,
    /// A `pdb` file at the binary's stem. Takes precedence when both
    /// variants exist.
    Pdb,
    /// An `mdb` file suffixing the full binary name. Also the canonical
    /// write-back form.
    Mdb,
}

impl SymbolFormat {
    /// Probes the filesystem next to `binary` and selects the read format.
    ///
    /// The `pdb` variant wins over `mdb` when both files exist; absence of
    /// both selects [`SymbolFormat::None`].
    #[must_use]
    pub fn probe(binary: &Path) -> Self {
        if pdb_path(binary).is_file() {
            Self::Pdb
        } else if mdb_path(binary).is_file() {
            Self::Mdb
        } else {
            Self::None
        }
    }

    /// The format symbols are written back in when this format was read.
    ///
    /// Reads of either variant are normalized to `mdb`; a module without
    /// symbols stays without symbols.
    #[must_use]
    pub const fn write_format(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Pdb | Self::Mdb => Self::Mdb,
        }
    }

    /// Path of this format's symbol file for the given binary, or `None`
    /// for [`SymbolFormat::None`].
    #[must_use]
    pub fn symbol_path(self, binary: &Path) -> Option<PathBuf> {
        match self {
            Self::None => None,
            Self::Pdb => Some(pdb_path(binary)),
            Self::Mdb => Some(mdb_path(binary)),
        }
    }
}

impl std::fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Pdb => "pdb",
            Self::Mdb => "mdb",
        })
    }
}

/// `App.Core.dll` → `App.Core.pdb`.
fn pdb_path(binary: &Path) -> PathBuf {
    binary.with_extension("pdb")
}

/// `App.Core.dll` → `App.Core.dll.mdb`.
fn mdb_path(binary: &Path) -> PathBuf {
    let mut name = binary.as_os_str().to_owned();
    name.push(MDB_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests;
