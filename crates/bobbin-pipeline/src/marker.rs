//! The idempotency marker protocol.
//!
//! A module that has been woven carries a sentinel entry in its type table.
//! The marker is the single source of truth for "already woven": the
//! pipeline checks it before running any weaver and stamps it exactly once,
//! immediately after all weavers for that module have run, so a rerun over
//! the same output tree is a complete no-op.

use bobbin_module::TypeEntry;

/// Simple name of the sentinel type stamped into processed modules.
pub const PROCESSED_MARKER: &str = "ProcessedByBobbin";

/// Builds the sentinel type-table entry.
#[must_use]
pub fn marker_entry() -> TypeEntry {
    TypeEntry::new(PROCESSED_MARKER)
}
