//! The per-module weaving pipeline and its top-level orchestrator.
//!
//! This crate ties the other Bobbin crates together. For one run, the
//! [`Orchestrator`] parses the configuration document (or falls back to the
//! built-in defaults), filters the candidate module paths through the
//! document's assembly filter, assembles the weaver lineup once, and then
//! drives [`weave::weave_module`] over each surviving module strictly
//! sequentially.
//!
//! Per module, the pipeline selects the debug-symbol format, loads the
//! module through the host's [`bobbin_module::ModuleCodec`], skips it when
//! the idempotency marker is already present, executes every active weaver
//! in declared order with per-weaver failure isolation, stamps the marker,
//! and writes the module (and normalized symbol file) back in place.
//!
//! Error containment follows the smallest-scope rule: only a malformed
//! configuration document aborts a run; weaver failures shrink to a report
//! entry; module read/write failures are that module's outcome and leave
//! every other module unaffected.

pub mod marker;
pub mod orchestrator;
pub mod target;
pub mod weave;

pub use self::marker::PROCESSED_MARKER;
pub use self::orchestrator::{ModuleReport, Orchestrator, RunReport};
pub use self::target::ModuleTarget;
pub use self::weave::{ModuleOutcome, WeaverFailure};
