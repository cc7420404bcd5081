//! Dynamic-library weaver loading over `libloading`.
//!
//! A weaver plugin is a `cdylib` exporting one constructor symbol
//! ([`WEAVER_ENTRY_SYMBOL`] unless the host overrides it) that returns a
//! boxed [`Weaver`] trait object. The [`export_weaver!`] macro emits the
//! constructor with the right shape.
//!
//! Trait objects cross the library boundary as plain Rust types, so weaver
//! binaries must be built with the same compiler version and `bobbin-plugins`
//! version as the host. That is the standard arrangement for a build-time
//! tool whose plugins ship from the same toolchain; ABI-stable plugin
//! surfaces are out of scope.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{LibraryLoader, WeaverLibrary};
use crate::error::PluginError;
use crate::weaver::Weaver;

/// Default exported constructor symbol looked up in weaver binaries.
pub const WEAVER_ENTRY_SYMBOL: &str = "bobbin_module_weaver";

/// Signature of the exported constructor.
type WeaverConstructor = unsafe extern "C" fn() -> *mut Box<dyn Weaver>;

/// Production [`LibraryLoader`] backed by `libloading`.
///
/// Any co-located debug-symbol file for the weaver binary itself is picked
/// up by the platform dynamic loader, so weaver stack traces stay
/// meaningful without extra work here.
#[derive(Debug, Clone, Copy, Default)]
pub struct DylibLoader;

impl LibraryLoader for DylibLoader {
    fn load(&self, path: &Path) -> Result<Arc<dyn WeaverLibrary>, PluginError> {
        // SAFETY: loading a library runs its initializers; the binaries
        // come from the host's own plugin directories, which is the trust
        // model of a build-time weaving step.
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            PluginError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(Arc::new(DylibLibrary {
            library,
            path: path.to_path_buf(),
        }))
    }
}

/// A loaded dynamic library; keeps the handle alive for as long as any
/// cache entry references it.
#[derive(Debug)]
struct DylibLibrary {
    library: libloading::Library,
    path: PathBuf,
}

impl WeaverLibrary for DylibLibrary {
    fn instantiate(&self, entry_symbol: &str) -> Result<Box<dyn Weaver>, PluginError> {
        // SAFETY: the symbol is only used as the constructor type below;
        // a mismatch is a build arrangement violation documented on this
        // module.
        let constructor: libloading::Symbol<'_, WeaverConstructor> = unsafe {
            self.library.get(entry_symbol.as_bytes())
        }
        .map_err(|_| PluginError::EntryPointMissing {
            path: self.path.clone(),
            symbol: entry_symbol.to_owned(),
        })?;
        // SAFETY: the constructor hands over ownership of a
        // `Box<Box<dyn Weaver>>` allocated in the plugin.
        let raw = unsafe { constructor() };
        if raw.is_null() {
            return Err(PluginError::ConstructFailed {
                path: self.path.clone(),
                message: String::from("constructor returned null"),
            });
        }
        // SAFETY: non-null pointer produced by `Box::into_raw` above.
        Ok(*unsafe { Box::from_raw(raw) })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Emits the exported constructor for a weaver plugin crate.
///
/// The weaver type must implement [`Default`] (activation is always default
/// construction) and [`Weaver`].
///
/// # Example
///
/// ```ignore
/// use bobbin_plugins::{WeaveContext, WeaveError, Weaver, export_weaver};
///
/// #[derive(Default)]
/// struct AlphaWeaver;
///
/// impl Weaver for AlphaWeaver {
///     fn execute(&mut self, _ctx: &mut WeaveContext<'_>) -> Result<(), WeaveError> {
///         Ok(())
///     }
/// }
///
/// export_weaver!(AlphaWeaver);
/// ```
#[macro_export]
macro_rules! export_weaver {
    ($weaver:ty) => {
        #[doc(hidden)]
        #[unsafe(no_mangle)]
        pub extern "C" fn bobbin_module_weaver() -> *mut ::std::boxed::Box<dyn $crate::Weaver> {
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(::std::boxed::Box::new(
                <$weaver as ::core::default::Default>::default(),
            )
                as ::std::boxed::Box<dyn $crate::Weaver>))
        }
    };
}
