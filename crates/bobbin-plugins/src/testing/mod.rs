//! In-process test doubles for lineup and pipeline tests.
//!
//! Real weaver binaries are separately compiled dynamic libraries, which
//! unit and integration tests cannot build. This module provides the
//! in-process equivalents: [`ScriptedWeaver`] records every interaction in a
//! shared [`Journal`], [`StaticLibrary`] plays the role of a loaded binary,
//! [`MapLoader`] maps paths to libraries while counting its disk "loads",
//! and [`StaticIndex`] maps weaver names to paths.
//!
//! Available under `cfg(test)` within this crate and behind the
//! `test-support` feature for the rest of the workspace.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bobbin_config::SettingsElement;
use bobbin_module::TypeEntry;

use crate::cache::{LibraryLoader, WeaverLibrary};
use crate::error::PluginError;
use crate::index::AssetIndex;
use crate::log::WeaverLog;
use crate::resolve::AssemblyResolver;
use crate::weaver::{LogSink, ResolverSink, SettingsSink, WeaveContext, WeaveError, Weaver};

/// Shared, append-only record of observable side effects.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    ///
    /// # Panics
    ///
    /// Panics when the journal mutex is poisoned; test-only code.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().expect("journal lock").push(entry.into());
    }

    /// Snapshot of all entries in append order.
    ///
    /// # Panics
    ///
    /// Panics when the journal mutex is poisoned; test-only code.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("journal lock").clone()
    }
}

/// A weaver whose behaviour is scripted by its builder and whose every
/// interaction lands in the [`Journal`].
///
/// Journal entry shapes: `{name}:{module file name}` on execute,
/// `{name}:fail` on a scripted failure, `{name}:settings:{element}` when
/// settings arrive, `{name}:resolver` and `{name}:log` on injection.
pub struct ScriptedWeaver {
    name: String,
    journal: Journal,
    fail_with: Option<String>,
    reject_settings_with: Option<String>,
    wants_settings: bool,
    wants_resolver: bool,
    wants_log: bool,
    log: Option<WeaverLog>,
}

impl ScriptedWeaver {
    /// Creates a well-behaved weaver recording into `journal`.
    #[must_use]
    pub fn new(name: impl Into<String>, journal: &Journal) -> Self {
        Self {
            name: name.into(),
            journal: journal.clone(),
            fail_with: None,
            reject_settings_with: None,
            wants_settings: false,
            wants_resolver: false,
            wants_log: false,
            log: None,
        }
    }

    /// Scripts every `execute` call to fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Opts in to the settings capability.
    #[must_use]
    pub const fn wanting_settings(mut self) -> Self {
        self.wants_settings = true;
        self
    }

    /// Opts in to settings and rejects whatever arrives.
    #[must_use]
    pub fn rejecting_settings(mut self, message: impl Into<String>) -> Self {
        self.wants_settings = true;
        self.reject_settings_with = Some(message.into());
        self
    }

    /// Opts in to the resolver capability.
    #[must_use]
    pub const fn wanting_resolver(mut self) -> Self {
        self.wants_resolver = true;
        self
    }

    /// Opts in to the log capability.
    #[must_use]
    pub const fn wanting_log(mut self) -> Self {
        self.wants_log = true;
        self
    }

    /// Type-table entry this weaver stamps into each module it weaves.
    fn stamp(&self) -> TypeEntry {
        TypeEntry::new(format!("WovenBy_{}", self.name.replace('.', "_")))
    }
}

impl Weaver for ScriptedWeaver {
    fn execute(&mut self, ctx: &mut WeaveContext<'_>) -> Result<(), WeaveError> {
        if let Some(message) = &self.fail_with {
            self.journal.push(format!("{}:fail", self.name));
            return Err(WeaveError::failed(message.clone()));
        }
        let file_name = ctx
            .module_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.journal.push(format!("{}:{file_name}", self.name));
        if let Some(log) = &self.log {
            log.debug(&format!("{} wove {file_name}", self.name));
        }
        ctx.module_mut().add_type(self.stamp());
        Ok(())
    }

    fn settings_sink(&mut self) -> Option<&mut dyn SettingsSink> {
        self.wants_settings.then_some(self as &mut dyn SettingsSink)
    }

    fn resolver_sink(&mut self) -> Option<&mut dyn ResolverSink> {
        self.wants_resolver.then_some(self as &mut dyn ResolverSink)
    }

    fn log_sink(&mut self) -> Option<&mut dyn LogSink> {
        self.wants_log.then_some(self as &mut dyn LogSink)
    }
}

impl SettingsSink for ScriptedWeaver {
    fn apply_settings(&mut self, settings: &SettingsElement) -> Result<(), WeaveError> {
        if let Some(message) = &self.reject_settings_with {
            return Err(WeaveError::settings(message.clone()));
        }
        self.journal
            .push(format!("{}:settings:{}", self.name, settings.name()));
        Ok(())
    }
}

impl ResolverSink for ScriptedWeaver {
    fn set_assembly_resolver(&mut self, _resolver: Arc<dyn AssemblyResolver>) {
        self.journal.push(format!("{}:resolver", self.name));
    }
}

impl LogSink for ScriptedWeaver {
    fn attach_log(&mut self, log: WeaverLog) {
        self.journal.push(format!("{}:log", self.name));
        self.log = Some(log);
    }
}

/// Factory signature used by [`StaticLibrary`].
pub type WeaverFactory = Arc<dyn Fn() -> Box<dyn Weaver> + Send + Sync>;

enum LibraryBehaviour {
    Construct(WeaverFactory),
    FailConstruct(String),
}

/// In-process stand-in for a loaded weaver binary.
pub struct StaticLibrary {
    path: PathBuf,
    entry_symbol: String,
    behaviour: LibraryBehaviour,
}

impl std::fmt::Debug for StaticLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticLibrary")
            .field("path", &self.path)
            .field("entry_symbol", &self.entry_symbol)
            .finish_non_exhaustive()
    }
}


impl StaticLibrary {
    /// A library whose constructor builds weavers from `factory`.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        entry_symbol: impl Into<String>,
        factory: WeaverFactory,
    ) -> Self {
        Self {
            path: path.into(),
            entry_symbol: entry_symbol.into(),
            behaviour: LibraryBehaviour::Construct(factory),
        }
    }

    /// A library whose constructor always fails with `message`.
    #[must_use]
    pub fn failing_construct(
        path: impl Into<PathBuf>,
        entry_symbol: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            entry_symbol: entry_symbol.into(),
            behaviour: LibraryBehaviour::FailConstruct(message.into()),
        }
    }
}

impl WeaverLibrary for StaticLibrary {
    fn instantiate(&self, entry_symbol: &str) -> Result<Box<dyn Weaver>, PluginError> {
        if entry_symbol != self.entry_symbol {
            return Err(PluginError::EntryPointMissing {
                path: self.path.clone(),
                symbol: entry_symbol.to_owned(),
            });
        }
        match &self.behaviour {
            LibraryBehaviour::Construct(factory) => Ok(factory()),
            LibraryBehaviour::FailConstruct(message) => Err(PluginError::ConstructFailed {
                path: self.path.clone(),
                message: message.clone(),
            }),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Loader over a fixed path-to-library map, counting every load call.
#[derive(Clone, Default)]
pub struct MapLoader {
    libraries: HashMap<String, Arc<dyn WeaverLibrary>>,
    loads: Arc<AtomicUsize>,
}

impl MapLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a library under its path.
    #[must_use]
    pub fn with_library(mut self, library: StaticLibrary) -> Self {
        let key = library.path().to_string_lossy().to_lowercase();
        self.libraries.insert(key, Arc::new(library));
        self
    }

    /// Number of times [`LibraryLoader::load`] actually ran.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Shared handle to the load counter, observable after the loader moves
    /// into a cache.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.loads)
    }
}

impl LibraryLoader for MapLoader {
    fn load(&self, path: &Path) -> Result<Arc<dyn WeaverLibrary>, PluginError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let key = path.to_string_lossy().to_lowercase();
        self.libraries
            .get(&key)
            .cloned()
            .ok_or_else(|| PluginError::LoadFailed {
                path: path.to_path_buf(),
                message: String::from("no such library registered"),
            })
    }
}

/// Asset index over a fixed name-to-path map.
#[derive(Debug, Clone, Default)]
pub struct StaticIndex {
    entries: HashMap<String, PathBuf>,
}

impl StaticIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a weaver name to a binary path.
    #[must_use]
    pub fn with_binary(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), path.into());
        self
    }
}

impl AssetIndex for StaticIndex {
    fn find_weaver_binary(&self, name: &str) -> Option<PathBuf> {
        self.entries.get(name).cloned()
    }
}
