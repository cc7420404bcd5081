//! The top-level orchestration entry point.
//!
//! An [`Orchestrator`] owns everything whose lifetime spans runs: the module
//! codec, the asset index, the weaver library cache, the host's built-in
//! weaver registrations, and the shared services injected into weavers.
//! Each [`Orchestrator::run`] call assembles a fresh lineup (instances are
//! per run) but loads weaver binaries through the shared cache, so repeat
//! runs within one orchestrator lifetime perform no repeat binary I/O.
//! Weaver binaries are assumed immutable for that lifetime.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use bobbin_config::{ConfigError, WeaverDocument};
use bobbin_module::{ModuleCodec, ModuleError};
use bobbin_plugins::{
    AssetIndex, BuiltinWeaver, LibraryCache, LibraryLoader, LineupReport, WeaverServices, lineup,
};

use crate::target::ModuleTarget;
use crate::weave::{ModuleOutcome, weave_module};

/// Tracing target for orchestration.
const ORCHESTRATOR_TARGET: &str = "bobbin_pipeline::orchestrator";

/// Outcome of one module within a run.
#[derive(Debug, Clone)]
pub struct ModuleReport {
    path: PathBuf,
    outcome: Result<ModuleOutcome, ModuleError>,
}

impl ModuleReport {
    /// Path of the module binary.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// The module's outcome: woven, skipped, or its fatal I/O error.
    #[must_use]
    pub const fn outcome(&self) -> &Result<ModuleOutcome, ModuleError> {
        &self.outcome
    }
}

/// Everything one run produced, inspectable by the host.
#[derive(Debug, Clone)]
pub struct RunReport {
    lineup: LineupReport,
    modules: Vec<ModuleReport>,
}

impl RunReport {
    /// Per-weaver assembly outcomes.
    #[must_use]
    pub const fn lineup(&self) -> &LineupReport {
        &self.lineup
    }

    /// Per-module outcomes, in processing order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleReport] {
        &self.modules
    }

    /// The outcome recorded for a module path, when it was processed.
    #[must_use]
    pub fn outcome_of(&self, path: &std::path::Path) -> Option<&Result<ModuleOutcome, ModuleError>> {
        self.modules
            .iter()
            .find(|m| m.path == path)
            .map(ModuleReport::outcome)
    }
}

/// Drives the whole weaving pipeline over a set of candidate modules.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use bobbin_module::JsonFileCodec;
/// use bobbin_pipeline::Orchestrator;
/// use bobbin_plugins::{DirectoryIndex, DylibLoader};
///
/// let index = DirectoryIndex::new(vec![PathBuf::from("/build/weavers")]);
/// let mut orchestrator = Orchestrator::new(JsonFileCodec, index, DylibLoader);
///
/// let document = std::fs::read_to_string("/build/Weavers.xml").ok();
/// let modules = vec![PathBuf::from("/build/out/App.Core.dll")];
/// let report = orchestrator.run(document.as_deref(), &modules)?;
/// println!("{} modules processed", report.modules().len());
/// # Ok::<(), bobbin_config::ConfigError>(())
/// ```
pub struct Orchestrator<C, I, L> {
    codec: C,
    index: I,
    cache: LibraryCache<L>,
    builtins: Vec<BuiltinWeaver>,
    services: WeaverServices,
}

impl<C, I, L> Orchestrator<C, I, L> {
    /// Creates an orchestrator with default services and no built-ins.
    #[must_use]
    pub fn new(codec: C, index: I, loader: L) -> Self {
        Self {
            codec,
            index,
            cache: LibraryCache::new(loader),
            builtins: Vec::new(),
            services: WeaverServices::default(),
        }
    }

    /// Registers a built-in weaver, appended after the declared set.
    #[must_use]
    pub fn with_builtin(mut self, builtin: BuiltinWeaver) -> Self {
        self.builtins.push(builtin);
        self
    }

    /// Replaces the shared services injected into weavers.
    #[must_use]
    pub fn with_services(mut self, services: WeaverServices) -> Self {
        self.services = services;
        self
    }

    /// The library cache, observable for instrumentation.
    #[must_use]
    pub const fn cache(&self) -> &LibraryCache<L> {
        &self.cache
    }
}

impl<C, I, L> Orchestrator<C, I, L>
where
    C: ModuleCodec,
    I: AssetIndex,
    L: LibraryLoader,
{
    /// Runs the pipeline over the candidate modules.
    ///
    /// `document` is the raw configuration document when one exists; `None`
    /// selects the fallback policy (no declared weavers, default module
    /// allow-list). Modules whose file name the document's filter does not
    /// permit are never loaded or written.
    ///
    /// Modules are processed strictly sequentially; a module's read/write
    /// failure is recorded as its outcome and the run continues.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed. This is the
    /// only run-aborting error and no module has been touched when it is
    /// raised.
    pub fn run(
        &mut self,
        document: Option<&str>,
        modules: &[PathBuf],
    ) -> Result<RunReport, ConfigError> {
        let parsed = document.map_or_else(|| Ok(WeaverDocument::fallback()), WeaverDocument::parse)?;

        let eligible: Vec<&PathBuf> = modules
            .iter()
            .filter(|path| {
                let permitted = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|name| parsed.filter().permits(&name));
                if !permitted {
                    debug!(
                        target: ORCHESTRATOR_TARGET,
                        module = %path.display(),
                        "module not in the processing set, skipping"
                    );
                }
                permitted
            })
            .collect();

        let mut weavers = lineup::assemble(
            &parsed,
            &self.builtins,
            &self.index,
            &mut self.cache,
            &self.services,
        );

        let mut reports = Vec::with_capacity(eligible.len());
        for path in eligible {
            let target = ModuleTarget::discover(path);
            let outcome = weave_module(&self.codec, &mut weavers, &target);
            match &outcome {
                Ok(ModuleOutcome::Woven { failures }) => info!(
                    target: ORCHESTRATOR_TARGET,
                    module = %path.display(),
                    failed_weavers = failures.len(),
                    "module woven"
                ),
                Ok(ModuleOutcome::AlreadyWoven) => info!(
                    target: ORCHESTRATOR_TARGET,
                    module = %path.display(),
                    "module already woven"
                ),
                Err(error) => warn!(
                    target: ORCHESTRATOR_TARGET,
                    module = %path.display(),
                    %error,
                    "module failed"
                ),
            }
            reports.push(ModuleReport {
                path: path.clone(),
                outcome,
            });
        }

        Ok(RunReport {
            lineup: weavers.into_report(),
            modules: reports,
        })
    }
}

impl<C, I, L> std::fmt::Debug for Orchestrator<C, I, L>
where
    C: std::fmt::Debug,
    I: std::fmt::Debug,
    L: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("codec", &self.codec)
            .field("index", &self.index)
            .field("cache", &self.cache)
            .field("builtins", &self.builtins)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
