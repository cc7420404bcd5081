//! The per-module weaving state machine.
//!
//! One call to [`weave_module`] takes a module from disk to disk: read with
//! the discovered symbol format, check the idempotency marker, run every
//! active weaver in declared order, stamp the marker, write back in place.
//! The pipeline exclusively owns the in-memory image for the whole
//! sequence; weavers receive it one at a time through a fresh
//! [`WeaveContext`] per invocation.

use tracing::{debug, warn};

use bobbin_module::{ModuleCodec, ModuleError};
use bobbin_plugins::{WeaveContext, WeaverLineup};

use crate::marker::{PROCESSED_MARKER, marker_entry};
use crate::target::ModuleTarget;

/// Tracing target for per-module weaving.
const WEAVE_TARGET: &str = "bobbin_pipeline::weave";

/// A weaver execution failure contained to one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaverFailure {
    weaver: String,
    message: String,
}

impl WeaverFailure {
    /// Name of the weaver that failed.
    #[must_use]
    pub const fn weaver(&self) -> &str {
        self.weaver.as_str()
    }

    /// Failure description.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Result of processing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// The module was woven, marked, and written back. Carries any
    /// contained per-weaver failures.
    Woven {
        /// Weavers that failed against this module; siblings still ran.
        failures: Vec<WeaverFailure>,
    },
    /// The module already carried the idempotency marker; nothing ran and
    /// nothing was written.
    AlreadyWoven,
}

impl ModuleOutcome {
    /// Returns `true` for a marked-and-written outcome with no weaver
    /// failures.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Woven { failures } if failures.is_empty())
    }
}

/// Weaves one module through the active lineup.
///
/// Write symbol handling is derived from the read format: a module read
/// with `pdb` symbols is written back with `mdb` symbols (the canonical
/// on-disk form), one read without symbols is written without.
///
/// # Errors
///
/// Returns a [`ModuleError`] when the module cannot be read or the
/// transformed module (or its symbol file) cannot be written back. These
/// are this module's fatal outcome; other modules are unaffected.
pub fn weave_module<C: ModuleCodec>(
    codec: &C,
    lineup: &mut WeaverLineup,
    target: &ModuleTarget,
) -> Result<ModuleOutcome, ModuleError> {
    let read_format = target.symbols();
    let write_format = read_format.write_format();
    let binary_path = target.binary_path();

    let mut image = codec.read(binary_path, read_format)?;

    if image.has_type(PROCESSED_MARKER) {
        debug!(
            target: WEAVE_TARGET,
            module = %binary_path.display(),
            "module already woven, skipping"
        );
        return Ok(ModuleOutcome::AlreadyWoven);
    }

    let mut failures = Vec::new();
    for weaver in lineup.weavers_mut() {
        let mut ctx = WeaveContext::new(&mut image, binary_path);
        if let Err(error) = weaver.instance_mut().execute(&mut ctx) {
            warn!(
                target: WEAVE_TARGET,
                weaver = weaver.name(),
                module = %binary_path.display(),
                %error,
                "weaver failed, continuing with remaining weavers"
            );
            failures.push(WeaverFailure {
                weaver: weaver.name().to_owned(),
                message: error.to_string(),
            });
        }
    }

    image.add_type(marker_entry());
    codec.write(&image, binary_path, write_format)?;

    debug!(
        target: WEAVE_TARGET,
        module = %binary_path.display(),
        symbols = %write_format,
        failed_weavers = failures.len(),
        "module woven and written"
    );
    Ok(ModuleOutcome::Woven { failures })
}
