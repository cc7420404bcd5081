//! Shared log-sink callbacks handed to weavers.
//!
//! Weavers do not log through `tracing` directly; they receive a
//! [`WeaverLog`] whose three severity callbacks the host controls. The
//! default routes to `tracing` so library consumers get structured output
//! without any wiring.

use std::sync::Arc;

/// A single shared log callback.
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Tracing target for messages emitted by weavers through the default log.
const WEAVER_TARGET: &str = "bobbin_plugins::weaver";

/// Severity-split log callbacks attached to weavers that declare the log
/// capability.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use bobbin_plugins::WeaverLog;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let log = WeaverLog::default().with_warning(Arc::new(move |msg: &str| {
///     sink.lock().expect("sink lock").push(msg.to_owned());
/// }));
///
/// log.warning("skipping weaver");
/// assert_eq!(seen.lock().expect("sink lock").as_slice(), ["skipping weaver"]);
/// ```
#[derive(Clone)]
pub struct WeaverLog {
    debug: LogFn,
    info: LogFn,
    warning: LogFn,
}

impl WeaverLog {
    /// Builds a log from three explicit callbacks.
    #[must_use]
    pub const fn new(debug: LogFn, info: LogFn, warning: LogFn) -> Self {
        Self {
            debug,
            info,
            warning,
        }
    }

    /// Replaces the debug callback.
    #[must_use]
    pub fn with_debug(mut self, debug: LogFn) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the info callback.
    #[must_use]
    pub fn with_info(mut self, info: LogFn) -> Self {
        self.info = info;
        self
    }

    /// Replaces the warning callback.
    #[must_use]
    pub fn with_warning(mut self, warning: LogFn) -> Self {
        self.warning = warning;
        self
    }

    /// Emits a debug-severity message.
    pub fn debug(&self, message: &str) {
        (self.debug)(message);
    }

    /// Emits an info-severity message.
    pub fn info(&self, message: &str) {
        (self.info)(message);
    }

    /// Emits a warning-severity message.
    pub fn warning(&self, message: &str) {
        (self.warning)(message);
    }
}

impl Default for WeaverLog {
    fn default() -> Self {
        Self {
            debug: Arc::new(|msg: &str| tracing::debug!(target: WEAVER_TARGET, "{msg}")),
            info: Arc::new(|msg: &str| tracing::info!(target: WEAVER_TARGET, "{msg}")),
            warning: Arc::new(|msg: &str| tracing::warn!(target: WEAVER_TARGET, "{msg}")),
        }
    }
}

impl std::fmt::Debug for WeaverLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaverLog").finish_non_exhaustive()
    }
}
