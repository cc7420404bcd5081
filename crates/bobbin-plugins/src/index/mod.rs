//! Mapping weaver names to binary artifacts.
//!
//! [`AssetIndex`] is the boundary to whatever indexed-asset lookup the host
//! build environment provides. [`DirectoryIndex`] is the standard
//! filesystem implementation: it prefers the exact platform dynamic-library
//! file name for the weaver, then falls back to a normalized stem match so
//! `Alpha.Weaver` finds `libalpha_weaver.so` regardless of the plugin
//! crate's naming convention.

use std::env::consts::{DLL_EXTENSION, DLL_PREFIX, DLL_SUFFIX};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Tracing target for asset lookup.
const INDEX_TARGET: &str = "bobbin_plugins::index";

/// Locates a weaver binary artifact by weaver name.
pub trait AssetIndex {
    /// Returns the binary path for `name`, or `None` when no artifact
    /// matches. The caller treats `None` as a non-fatal drop.
    fn find_weaver_binary(&self, name: &str) -> Option<PathBuf>;
}

/// Index scanning an ordered list of directories for weaver binaries.
///
/// # Example
///
/// ```
/// use bobbin_plugins::{AssetIndex, DirectoryIndex};
/// use std::path::PathBuf;
///
/// let index = DirectoryIndex::new(vec![PathBuf::from("/build/weavers")]);
/// assert!(index.find_weaver_binary("Absent.Weaver").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryIndex {
    directories: Vec<PathBuf>,
}

impl DirectoryIndex {
    /// Creates an index over the given directories, scanned in order.
    #[must_use]
    pub const fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// Appends a directory to scan.
    pub fn add_directory(&mut self, directory: PathBuf) {
        self.directories.push(directory);
    }
}

impl AssetIndex for DirectoryIndex {
    fn find_weaver_binary(&self, name: &str) -> Option<PathBuf> {
        let exact = format!("{DLL_PREFIX}{normalized}{DLL_SUFFIX}", normalized = stem_key(name));
        for dir in &self.directories {
            let literal = dir.join(&exact);
            if literal.is_file() {
                debug!(target: INDEX_TARGET, weaver = name, path = %literal.display(), "exact binary match");
                return Some(literal);
            }
        }
        for dir in &self.directories {
            if let Some(found) = scan_for_stem(dir, name) {
                debug!(target: INDEX_TARGET, weaver = name, path = %found.display(), "stem binary match");
                return Some(found);
            }
        }
        None
    }
}

/// Scans one directory for a dynamic library whose stem matches `name`.
fn scan_for_stem(dir: &Path, name: &str) -> Option<PathBuf> {
    let wanted = stem_key(name);
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_dylib = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DLL_EXTENSION));
        if !is_dylib {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let bare = stem.strip_prefix(DLL_PREFIX).unwrap_or(stem);
        if stem_key(bare) == wanted {
            return Some(path);
        }
    }
    None
}

/// Normalizes a weaver or file-stem name for comparison: lower-cased, with
/// `.` and `-` mapped to `_` so `Alpha.Weaver` matches `alpha_weaver`.
fn stem_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests;
