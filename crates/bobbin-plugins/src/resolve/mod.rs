//! Cross-module assembly resolution.
//!
//! Weavers that rewrite references across modules need to locate other
//! module binaries by name. The host supplies an [`AssemblyResolver`] for
//! this; [`SearchPathResolver`] is the standard implementation, probing a
//! list of search directories in order.

use std::path::{Path, PathBuf};

/// Locates a module binary by file name.
pub trait AssemblyResolver: Send + Sync {
    /// Returns the path of the first binary matching `name`, or `None`.
    ///
    /// `name` may be given with or without its file extension.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Resolver probing an ordered list of search directories.
///
/// # Example
///
/// ```
/// use bobbin_plugins::{AssemblyResolver, SearchPathResolver};
/// use std::path::PathBuf;
///
/// let mut resolver = SearchPathResolver::new();
/// resolver.add_search_directory(PathBuf::from("/build/managed"));
/// assert!(resolver.resolve("DoesNotExist").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    directories: Vec<PathBuf>,
}

impl SearchPathResolver {
    /// Creates a resolver with no search directories.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            directories: Vec::new(),
        }
    }

    /// Creates a resolver over the given directories, probed in order.
    #[must_use]
    pub const fn with_directories(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// Appends a search directory.
    pub fn add_search_directory(&mut self, directory: PathBuf) {
        self.directories.push(directory);
    }

    /// The configured search directories, in probe order.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

impl AssemblyResolver for SearchPathResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        for dir in &self.directories {
            let literal = dir.join(name);
            if literal.is_file() {
                return Some(literal);
            }
            if Path::new(name).extension().is_none() {
                let with_extension = dir.join(format!("{name}.dll"));
                if with_extension.is_file() {
                    return Some(with_extension);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests;
