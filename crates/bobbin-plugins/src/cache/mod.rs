//! Loading weaver binaries exactly once per cache lifetime.
//!
//! [`LibraryCache`] wraps a [`LibraryLoader`] with a path-keyed cache: the
//! first load of a path hits the loader, every later load of the same path
//! (compared case-insensitively) returns the cached handle with no I/O. The
//! cache is unbounded and never evicted; its lifetime equals the owning
//! orchestrator's, and weaver binaries are assumed immutable for that
//! lifetime. A binary changing on disk mid-session is outside the contract.
//!
//! The loader trait is the test seam: production uses
//! [`crate::dylib::DylibLoader`]; tests inject in-process loaders that count
//! their calls.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::PluginError;
use crate::weaver::Weaver;

/// Tracing target for library loading.
const CACHE_TARGET: &str = "bobbin_plugins::cache";

/// A loaded weaver binary, able to construct weaver instances.
///
/// Implementations own whatever keeps the loaded code alive (for dynamic
/// libraries, the library handle itself), so instances never outlive their
/// code.
pub trait WeaverLibrary: std::fmt::Debug {
    /// Constructs one weaver instance through the exported constructor
    /// symbol with the given exact name.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::EntryPointMissing`] when the binary does not
    /// export the symbol, or [`PluginError::ConstructFailed`] when the
    /// constructor produces no usable instance.
    fn instantiate(&self, entry_symbol: &str) -> Result<Box<dyn Weaver>, PluginError>;

    /// The binary path this library was loaded from.
    fn path(&self) -> &Path;
}

/// Performs the actual load of a weaver binary from disk.
pub trait LibraryLoader {
    /// Loads the binary at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::LoadFailed`] when the binary cannot be loaded
    /// into the process.
    fn load(&self, path: &Path) -> Result<Arc<dyn WeaverLibrary>, PluginError>;
}

/// Path-keyed cache of loaded weaver binaries.
///
/// # Example
///
/// ```rust,no_run
/// use bobbin_plugins::{DylibLoader, LibraryCache};
/// use std::path::Path;
///
/// let mut cache = LibraryCache::new(DylibLoader);
/// let first = cache.load(Path::new("/build/weavers/libalpha_weaver.so"))?;
/// // Same path, different case: no second disk load.
/// let again = cache.load(Path::new("/build/weavers/LibAlpha_Weaver.so"))?;
/// # Ok::<(), bobbin_plugins::PluginError>(())
/// ```
pub struct LibraryCache<L> {
    loader: L,
    loaded: HashMap<String, Arc<dyn WeaverLibrary>>,
}

impl<L> LibraryCache<L> {
    /// Creates an empty cache over the given loader.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            loaded: HashMap::new(),
        }
    }

    /// Number of distinct binary paths loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Returns `true` when nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl<L: LibraryLoader> LibraryCache<L> {
    /// Returns the library for `path`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`PluginError::LoadFailed`] from the loader. Failed loads
    /// are not cached; a later call retries.
    pub fn load(&mut self, path: &Path) -> Result<Arc<dyn WeaverLibrary>, PluginError> {
        let key = cache_key(path);
        if let Some(library) = self.loaded.get(&key) {
            debug!(target: CACHE_TARGET, path = %path.display(), "library cache hit");
            return Ok(Arc::clone(library));
        }
        debug!(target: CACHE_TARGET, path = %path.display(), "loading weaver binary");
        let library = self.loader.load(path)?;
        self.loaded.insert(key, Arc::clone(&library));
        Ok(library)
    }
}

/// Case-insensitive cache key for a binary path.
fn cache_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

impl<L: std::fmt::Debug> std::fmt::Debug for LibraryCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryCache")
            .field("loader", &self.loader)
            .field("loaded", &self.loaded.len())
            .finish()
    }
}
