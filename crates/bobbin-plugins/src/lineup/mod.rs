//! Assembling the run's weaver lineup from configuration declarations.
//!
//! [`assemble`] walks the document's declarations in order and, per
//! declaration, performs the resolve → load → instantiate → configure
//! progression. Every step has an explicit outcome recorded as a
//! [`Disposition`] in the [`LineupReport`]; a failed step drops that weaver
//! and moves on, so one broken plugin never aborts the run. Host-registered
//! built-in weavers are appended after the declared set.
//!
//! Loading and activation happen once per run. Execution happens once per
//! module per weaver, in the pipeline, against the instances assembled here.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use bobbin_config::{SettingsElement, WeaverDeclaration, WeaverDocument};

use crate::cache::{LibraryCache, LibraryLoader};
use crate::dylib::WEAVER_ENTRY_SYMBOL;
use crate::error::PluginError;
use crate::index::AssetIndex;
use crate::log::WeaverLog;
use crate::resolve::{AssemblyResolver, SearchPathResolver};
use crate::weaver::Weaver;

/// Tracing target for lineup assembly.
const LINEUP_TARGET: &str = "bobbin_plugins::lineup";

/// Shared services injected into weavers during configuration.
#[derive(Clone)]
pub struct WeaverServices {
    resolver: Arc<dyn AssemblyResolver>,
    log: WeaverLog,
    entry_symbol: String,
}

impl WeaverServices {
    /// Creates services around the given assembly resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn AssemblyResolver>) -> Self {
        Self {
            resolver,
            log: WeaverLog::default(),
            entry_symbol: WEAVER_ENTRY_SYMBOL.to_owned(),
        }
    }

    /// Replaces the log callbacks handed to weavers.
    #[must_use]
    pub fn with_log(mut self, log: WeaverLog) -> Self {
        self.log = log;
        self
    }

    /// Overrides the exported constructor symbol looked up in weaver
    /// binaries.
    #[must_use]
    pub fn with_entry_symbol(mut self, entry_symbol: impl Into<String>) -> Self {
        self.entry_symbol = entry_symbol.into();
        self
    }

    /// The shared assembly resolver.
    #[must_use]
    pub fn resolver(&self) -> Arc<dyn AssemblyResolver> {
        Arc::clone(&self.resolver)
    }

    /// The shared log callbacks.
    #[must_use]
    pub const fn log(&self) -> &WeaverLog {
        &self.log
    }

    /// The constructor symbol in effect.
    #[must_use]
    pub const fn entry_symbol(&self) -> &str {
        self.entry_symbol.as_str()
    }
}

impl Default for WeaverServices {
    fn default() -> Self {
        Self::new(Arc::new(SearchPathResolver::new()))
    }
}

impl std::fmt::Debug for WeaverServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaverServices")
            .field("entry_symbol", &self.entry_symbol)
            .finish_non_exhaustive()
    }
}

/// A host-registered in-process weaver appended after the declared set.
pub struct BuiltinWeaver {
    name: String,
    factory: Box<dyn Fn() -> Box<dyn Weaver> + Send + Sync>,
}

impl BuiltinWeaver {
    /// Registers a built-in weaver under the given name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn() -> Box<dyn Weaver> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    /// The weaver's display name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Debug for BuiltinWeaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinWeaver")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of one declaration's resolve → load → instantiate → configure
/// progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Disposition {
    /// The weaver is active for this run.
    Active,
    /// No binary artifact matched the weaver name.
    BinaryNotFound,
    /// The binary could not be loaded into the process.
    LoadFailed {
        /// Loader description of the failure.
        message: String,
    },
    /// The binary does not export the constructor symbol.
    EntryPointMissing {
        /// Symbol that was looked up.
        symbol: String,
    },
    /// The constructor produced no usable instance.
    ConstructFailed {
        /// Description of the construction failure.
        message: String,
    },
    /// The weaver rejected its settings fragment.
    SettingsRejected {
        /// Weaver-supplied description of the rejection.
        message: String,
    },
}

impl Disposition {
    fn from_error(error: &PluginError) -> Self {
        match error {
            PluginError::BinaryNotFound { .. } => Self::BinaryNotFound,
            PluginError::LoadFailed { message, .. } => Self::LoadFailed {
                message: message.clone(),
            },
            PluginError::EntryPointMissing { symbol, .. } => Self::EntryPointMissing {
                symbol: symbol.clone(),
            },
            PluginError::ConstructFailed { message, .. } => Self::ConstructFailed {
                message: message.clone(),
            },
        }
    }
}

/// One weaver's entry in the lineup report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupEntry {
    name: String,
    disposition: Disposition,
}

impl LineupEntry {
    /// Weaver name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The recorded outcome.
    #[must_use]
    pub const fn disposition(&self) -> &Disposition {
        &self.disposition
    }
}

/// Aggregated per-weaver outcomes for one assembly pass.
///
/// Serializes to JSON so host build tooling can persist or display the
/// assembly outcome alongside its own build report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineupReport {
    entries: Vec<LineupEntry>,
}

impl LineupReport {
    /// All entries in declaration order (built-ins last).
    #[must_use]
    pub fn entries(&self) -> &[LineupEntry] {
        &self.entries
    }

    /// The disposition recorded for `name`, when any.
    #[must_use]
    pub fn disposition_of(&self, name: &str) -> Option<&Disposition> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(LineupEntry::disposition)
    }

    /// Number of active weavers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.disposition == Disposition::Active)
            .count()
    }

    fn record(&mut self, name: &str, disposition: Disposition) {
        self.entries.push(LineupEntry {
            name: name.to_owned(),
            disposition,
        });
    }
}

/// An activated, configured weaver ready to execute against modules.
pub struct ActiveWeaver {
    name: String,
    instance: Box<dyn Weaver>,
}

impl ActiveWeaver {
    /// Weaver name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Mutable access to the weaver instance.
    pub fn instance_mut(&mut self) -> &mut dyn Weaver {
        self.instance.as_mut()
    }
}

impl std::fmt::Debug for ActiveWeaver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveWeaver")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The assembled weaver set for one run, plus its report.
#[derive(Debug, Default)]
pub struct WeaverLineup {
    weavers: Vec<ActiveWeaver>,
    report: LineupReport,
}

impl WeaverLineup {
    /// Active weavers in execution order.
    pub fn weavers_mut(&mut self) -> impl Iterator<Item = &mut ActiveWeaver> {
        self.weavers.iter_mut()
    }

    /// Number of active weavers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weavers.len()
    }

    /// Returns `true` when no weaver survived assembly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weavers.is_empty()
    }

    /// The assembly report.
    #[must_use]
    pub const fn report(&self) -> &LineupReport {
        &self.report
    }

    /// Consumes the lineup, keeping only the report.
    #[must_use]
    pub fn into_report(self) -> LineupReport {
        self.report
    }
}

/// Assembles the weaver lineup for one run.
///
/// Declarations are processed in document order; built-ins are appended
/// afterwards. Each weaver binary loads through `cache`, so repeated runs on
/// the same cache perform no repeat I/O. Failures shrink the lineup and are
/// recorded, never propagated.
pub fn assemble<I, L>(
    document: &WeaverDocument,
    builtins: &[BuiltinWeaver],
    index: &I,
    cache: &mut LibraryCache<L>,
    services: &WeaverServices,
) -> WeaverLineup
where
    I: AssetIndex,
    L: LibraryLoader,
{
    let mut lineup = WeaverLineup::default();

    for declaration in document.declarations() {
        match activate_declared(declaration, index, cache, services) {
            Ok(instance) => {
                lineup.report.record(declaration.name(), Disposition::Active);
                lineup.weavers.push(ActiveWeaver {
                    name: declaration.name().to_owned(),
                    instance,
                });
            }
            Err(disposition) => {
                warn!(
                    target: LINEUP_TARGET,
                    weaver = declaration.name(),
                    ?disposition,
                    "dropping weaver from lineup"
                );
                services.log.warning(&format!(
                    "dropping weaver '{}': {disposition:?}",
                    declaration.name()
                ));
                lineup.report.record(declaration.name(), disposition);
            }
        }
    }

    for builtin in builtins {
        let mut instance = (builtin.factory)();
        inject_services(instance.as_mut(), services);
        lineup.report.record(builtin.name(), Disposition::Active);
        lineup.weavers.push(ActiveWeaver {
            name: builtin.name().to_owned(),
            instance,
        });
    }

    let roster: Vec<&str> = lineup.weavers.iter().map(|w| w.name.as_str()).collect();
    info!(
        target: LINEUP_TARGET,
        weavers = roster.join("; "),
        "assembled weaver lineup"
    );

    lineup
}

/// Runs one declaration through resolve → load → instantiate → configure.
fn activate_declared<I, L>(
    declaration: &WeaverDeclaration,
    index: &I,
    cache: &mut LibraryCache<L>,
    services: &WeaverServices,
) -> Result<Box<dyn Weaver>, Disposition>
where
    I: AssetIndex,
    L: LibraryLoader,
{
    let Some(path) = index.find_weaver_binary(declaration.name()) else {
        return Err(Disposition::BinaryNotFound);
    };
    let library = cache
        .load(&path)
        .map_err(|e| Disposition::from_error(&e))?;
    let mut instance = library
        .instantiate(services.entry_symbol())
        .map_err(|e| Disposition::from_error(&e))?;

    if let Some(sink) = instance.settings_sink() {
        let settings =
            SettingsElement::parse(declaration.name(), declaration.settings_xml()).map_err(
                |e| Disposition::SettingsRejected {
                    message: e.to_string(),
                },
            )?;
        sink.apply_settings(&settings)
            .map_err(|e| Disposition::SettingsRejected {
                message: e.to_string(),
            })?;
    }
    inject_services(instance.as_mut(), services);
    Ok(instance)
}

/// Best-effort injection of the shared resolver and log callbacks.
fn inject_services(instance: &mut dyn Weaver, services: &WeaverServices) {
    if let Some(sink) = instance.resolver_sink() {
        sink.set_assembly_resolver(services.resolver());
    }
    if let Some(sink) = instance.log_sink() {
        sink.attach_log(services.log.clone());
    }
}
