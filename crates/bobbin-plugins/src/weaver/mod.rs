//! The weaver trait and its optional capability extension points.
//!
//! A weaver's only required surface is [`Weaver::execute`], which receives a
//! fresh [`WeaveContext`] per module. Everything else is opt-in: a weaver
//! that wants settings, a cross-module assembly resolver, or log callbacks
//! answers the corresponding capability query with `Some(self)`. The lineup
//! assembler probes each query exactly once after instantiation and injects
//! only what the weaver asked for; a `None` answer is never an error.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use bobbin_config::SettingsElement;
use bobbin_module::ModuleImage;

use crate::log::WeaverLog;
use crate::resolve::AssemblyResolver;

/// Failure reported by a weaver, either while applying settings or during
/// execution against a module.
#[derive(Debug, Clone, Error)]
pub enum WeaveError {
    /// The weaver's transformation failed.
    #[error("{message}")]
    Failed {
        /// Weaver-supplied description of the failure.
        message: String,
    },

    /// The weaver rejected its settings fragment.
    #[error("settings rejected: {message}")]
    Settings {
        /// Weaver-supplied description of the rejection.
        message: String,
    },
}

impl WeaveError {
    /// Builds an execution failure from any displayable cause.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Builds a settings rejection from any displayable cause.
    #[must_use]
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }
}

/// Per-module execution context handed to [`Weaver::execute`].
///
/// The context borrows the pipeline's exclusively owned module image for the
/// duration of one weaver's run; weavers execute strictly sequentially, so
/// no two ever hold the borrow at once.
#[derive(Debug)]
pub struct WeaveContext<'a> {
    module: &'a mut ModuleImage,
    module_path: &'a Path,
}

impl<'a> WeaveContext<'a> {
    /// Builds a context for one weaver invocation.
    #[must_use]
    pub const fn new(module: &'a mut ModuleImage, module_path: &'a Path) -> Self {
        Self {
            module,
            module_path,
        }
    }

    /// Read access to the module under transformation.
    #[must_use]
    pub const fn module(&self) -> &ModuleImage {
        self.module
    }

    /// Mutable access to the module under transformation.
    #[must_use]
    pub const fn module_mut(&mut self) -> &mut ModuleImage {
        self.module
    }

    /// On-disk path of the module binary.
    #[must_use]
    pub const fn module_path(&self) -> &Path {
        self.module_path
    }
}

/// A bytecode transformation plugin.
///
/// # Example
///
/// ```
/// use bobbin_module::TypeEntry;
/// use bobbin_plugins::{WeaveContext, WeaveError, Weaver};
///
/// #[derive(Default)]
/// struct StampWeaver;
///
/// impl Weaver for StampWeaver {
///     fn execute(&mut self, ctx: &mut WeaveContext<'_>) -> Result<(), WeaveError> {
///         ctx.module_mut().add_type(TypeEntry::new("Stamped"));
///         Ok(())
///     }
/// }
/// ```
pub trait Weaver {
    /// Runs the transformation against the module in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaveError`] describing the failure. The pipeline logs it
    /// with the weaver's identity and the module path and continues with the
    /// remaining weavers; one weaver's failure never blocks its siblings or
    /// the idempotency marker.
    fn execute(&mut self, ctx: &mut WeaveContext<'_>) -> Result<(), WeaveError>;

    /// Capability query: settings injection.
    fn settings_sink(&mut self) -> Option<&mut dyn SettingsSink> {
        None
    }

    /// Capability query: cross-module assembly resolution.
    fn resolver_sink(&mut self) -> Option<&mut dyn ResolverSink> {
        None
    }

    /// Capability query: host log callbacks.
    fn log_sink(&mut self) -> Option<&mut dyn LogSink> {
        None
    }
}

/// Capability: receives the structured settings fragment declared for this
/// weaver in the configuration document.
pub trait SettingsSink {
    /// Applies the weaver's private settings.
    ///
    /// # Errors
    ///
    /// Returns a [`WeaveError`] when the settings are unusable; the weaver
    /// is then dropped from the lineup and the rejection recorded.
    fn apply_settings(&mut self, settings: &SettingsElement) -> Result<(), WeaveError>;
}

/// Capability: receives the shared resolver for locating cross-referenced
/// modules by name.
pub trait ResolverSink {
    /// Stores the shared assembly resolver.
    fn set_assembly_resolver(&mut self, resolver: Arc<dyn AssemblyResolver>);
}

/// Capability: receives the host's severity-split log callbacks.
pub trait LogSink {
    /// Stores the shared log.
    fn attach_log(&mut self, log: WeaverLog);
}

#[cfg(test)]
mod tests;
